use std::path::PathBuf;
use std::sync::Arc;

use eframe::{
    egui::{self, Color32, ViewportCommand},
    App, Frame,
};

use crate::{slot::ImageSlot, ui::ImageMetrics};

const BACKGROUND: Color32 = Color32::from_gray(40);

pub struct ViewerApp {
    path: PathBuf,
    slot: Arc<ImageSlot>,
    texture: Option<egui::TextureHandle>,
    shown_generation: u64,
}

impl ViewerApp {
    pub fn new(path: PathBuf, slot: Arc<ImageSlot>) -> Self {
        Self {
            path,
            slot,
            texture: None,
            shown_generation: 0,
        }
    }
}

impl App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut Frame) {
        let _ = frame;

        if ctx.input(|input| input.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(ViewportCommand::Close);
            return;
        }

        // Snapshot once per frame; the lock is released before any drawing.
        let snapshot = self.slot.snapshot();
        if let Some((generation, image)) = &snapshot {
            if *generation != self.shown_generation {
                if let Some(texture) = self.texture.as_mut() {
                    texture.set(image.pixels.clone(), egui::TextureOptions::LINEAR);
                } else {
                    self.texture = Some(ctx.load_texture(
                        "imgwatch-current",
                        image.pixels.clone(),
                        egui::TextureOptions::LINEAR,
                    ));
                }
                self.shown_generation = *generation;
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::hover());
            painter.rect_filled(response.rect, 0.0, BACKGROUND);

            let draw_text_with_bg =
                |pos: egui::Pos2, align: egui::Align2, text: String, font: egui::FontId| {
                    let galley = ctx.fonts_mut(|fonts| fonts.layout_no_wrap(text, font, Color32::WHITE));
                    let rect = align.anchor_size(pos, galley.size());
                    painter.rect_filled(rect.expand(4.0), 4.0, Color32::from_black_alpha(178));
                    painter.galley(rect.min, galley, Color32::WHITE);
                };

            if let (Some(texture), Some((_, image))) = (&self.texture, &snapshot) {
                let metrics = ImageMetrics::new(response.rect, image.size_vec2());
                painter.image(
                    texture.id(),
                    metrics.image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );

                draw_text_with_bg(
                    response.rect.left_bottom() + egui::vec2(12.0, -12.0),
                    egui::Align2::LEFT_BOTTOM,
                    format!(
                        "{} ({}x{})",
                        self.path.display(),
                        image.width,
                        image.height
                    ),
                    egui::FontId::monospace(14.0),
                );
            } else {
                painter.text(
                    response.rect.center(),
                    egui::Align2::CENTER_CENTER,
                    format!("Loading {}...", self.path.display()),
                    egui::FontId::proportional(24.0),
                    Color32::WHITE,
                );
            }
        });
    }
}
