#![allow(dead_code)]

use eframe::egui;
use image::{DynamicImage, Rgba, RgbaImage};
use imgwatch::decode::DecodedImage;
use std::path::PathBuf;

pub fn solid_image(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
    let pixel = Rgba(color);
    let buffer = RgbaImage::from_pixel(width, height, pixel);
    DynamicImage::ImageRgba8(buffer)
}

pub fn write_image(path: impl Into<PathBuf>, image: &DynamicImage) {
    image
        .save(path.into())
        .expect("failed to write image to disk");
}

/// Decoded image with every channel set to `value` (alpha 255), so a reader
/// can verify the pixel data matches the dimensions it came with.
pub fn solid_decoded(width: u32, height: u32, value: u8) -> DecodedImage {
    let bytes: Vec<u8> = std::iter::repeat([value, value, value, 255])
        .take((width * height) as usize)
        .flatten()
        .collect();
    let pixels =
        egui::ColorImage::from_rgba_unmultiplied([width as usize, height as usize], &bytes);
    DecodedImage {
        width,
        height,
        pixels,
    }
}
