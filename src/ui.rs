use eframe::egui::{self, Rect, Vec2};

/// Placement of the current image within the window.
pub struct ImageMetrics {
    pub image_rect: Rect,
    pub image_size: Vec2,
    pub scale: f32,
}

impl ImageMetrics {
    pub fn new(canvas: Rect, image_size: Vec2) -> Self {
        let (display, scale) = fit_within(image_size, canvas.size());
        let offset = (canvas.size() - display) * 0.5;
        let image_rect = Rect::from_min_size(canvas.min + offset, display);
        Self {
            image_rect,
            image_size,
            scale,
        }
    }
}

/// Largest rectangle with the image's aspect ratio that fits `available`.
/// Scales down only: an image smaller than the window is shown 1:1.
pub fn fit_within(image_size: Vec2, available: Vec2) -> (Vec2, f32) {
    let safe_size = egui::vec2(image_size.x.max(1.0), image_size.y.max(1.0));
    let scale = (available.x / safe_size.x)
        .min(available.y / safe_size.y)
        .min(1.0);
    (safe_size * scale, scale)
}
