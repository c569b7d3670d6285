//! Text-only variant: a resizable window showing a fixed greeting.

use anyhow::Result;
use eframe::{
    egui::{self, Color32, ViewportCommand},
    App, Frame,
};

struct TextPane;

impl App for TextPane {
    fn update(&mut self, ctx: &egui::Context, frame: &mut Frame) {
        let _ = frame;

        if ctx.input(|input| input.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(ViewportCommand::Close);
            return;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::hover());
            painter.rect_filled(response.rect, 0.0, Color32::WHITE);
            painter.text(
                response.rect.left_top() + egui::vec2(10.0, 10.0),
                egui::Align2::LEFT_TOP,
                "hei!",
                egui::FontId::proportional(16.0),
                Color32::BLACK,
            );
        });
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("textpane")
            .with_inner_size(egui::vec2(400.0, 300.0)),
        ..Default::default()
    };

    eframe::run_native(
        "textpane",
        native_options,
        Box::new(|_cc| Ok(Box::new(TextPane))),
    )?;

    Ok(())
}
