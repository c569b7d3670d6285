use std::io::Cursor;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use eframe::egui;
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer};
use image::{DynamicImage, RgbaImage};
use zune_jpeg::JpegDecoder;

/// What to do when the watched file changes but no longer decodes.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum DecodePolicy {
    /// Terminate the process with a nonzero status
    Fatal,
    /// Log the failure and keep showing the last good image
    KeepLast,
}

/// A fully decoded image, ready for texture upload. Immutable once built.
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: egui::ColorImage,
}

impl DecodedImage {
    pub fn size_vec2(&self) -> egui::Vec2 {
        egui::vec2(self.width as f32, self.height as f32)
    }
}

// Images beyond 4K are downscaled before upload; the window cannot show the
// extra pixels and oversized textures are rejected by some GPU backends.
const MAX_TEXTURE_SIZE: (u32, u32) = (3840, 2160);

/// Read and decode the image at `path`.
pub fn decode_image(path: &Path) -> Result<DecodedImage> {
    let bytes = std::fs::read(path).with_context(|| format!("unable to read {}", path.display()))?;

    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.eq_ignore_ascii_case("jpg") || s.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);

    // zune-jpeg is considerably faster for baseline JPEGs; fall back to the
    // image crate for anything it cannot handle (progressive, grayscale).
    let decoded = if is_jpeg {
        decode_jpeg_fast(&bytes)
            .or_else(|_| image::load_from_memory(&bytes).map_err(anyhow::Error::from))
    } else {
        image::load_from_memory(&bytes).map_err(Into::into)
    };
    let image =
        decoded.with_context(|| format!("unable to decode {}", path.display()))?;
    drop(bytes);

    let image = clamp_for_texture(image)?;
    let pixels = to_color_image(&image);
    Ok(DecodedImage {
        width: image.width(),
        height: image.height(),
        pixels,
    })
}

fn decode_jpeg_fast(bytes: &[u8]) -> Result<DynamicImage> {
    let mut decoder = JpegDecoder::new(Cursor::new(bytes));
    let pixels = decoder
        .decode()
        .map_err(|err| anyhow!("zune-jpeg: {err}"))?;
    let info = decoder
        .info()
        .ok_or_else(|| anyhow!("jpeg header missing after decode"))?;
    // zune-jpeg returns RGB8 for baseline files
    image::RgbImage::from_raw(info.width as u32, info.height as u32, pixels)
        .map(DynamicImage::ImageRgb8)
        .ok_or_else(|| anyhow!("jpeg pixel buffer does not match reported dimensions"))
}

fn clamp_for_texture(image: DynamicImage) -> Result<DynamicImage> {
    let (max_w, max_h) = MAX_TEXTURE_SIZE;
    if image.width() <= max_w && image.height() <= max_h {
        return Ok(image);
    }

    let ratio = image.width() as f64 / image.height() as f64;
    let (new_w, new_h) = if ratio > max_w as f64 / max_h as f64 {
        (max_w, (max_w as f64 / ratio) as u32)
    } else {
        ((max_h as f64 * ratio) as u32, max_h)
    };

    let rgba = image.to_rgba8();
    let src = Image::from_vec_u8(rgba.width(), rgba.height(), rgba.into_raw(), PixelType::U8x4)
        .map_err(|err| anyhow!("resize source: {err}"))?;
    let mut dst = Image::new(new_w, new_h, PixelType::U8x4);
    Resizer::new()
        .resize(&src, &mut dst, &ResizeOptions::default())
        .map_err(|err| anyhow!("resize: {err}"))?;
    let buffer = RgbaImage::from_raw(new_w, new_h, dst.into_vec())
        .ok_or_else(|| anyhow!("resized pixel buffer does not match dimensions"))?;
    Ok(DynamicImage::ImageRgba8(buffer))
}

pub fn to_color_image(img: &DynamicImage) -> egui::ColorImage {
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    egui::ColorImage::from_rgba_unmultiplied(size, &pixels)
}
