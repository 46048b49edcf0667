use eframe::egui::{self, Color32, Stroke};

use crate::session::ToolSession;

/// Composes a frame from the session: background, committed drawables in
/// insertion order, then the preview on top. Owns no drawing logic itself.
#[derive(Debug, Clone)]
pub struct Renderer {
    frame_border: Stroke,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            frame_border: Stroke::new(1.0, Color32::GRAY),
        }
    }

    /// Clear `rect` and redraw everything the session currently shows
    ///
    /// Args:
    ///     painter (egui::Painter): The painter to draw with
    ///     rect (egui::Rect): Screen rectangle of the canvas
    ///     session (ToolSession): Source of committed drawables and preview
    pub fn render(&self, painter: &egui::Painter, rect: egui::Rect, session: &ToolSession) {
        let offset = rect.min.to_vec2();
        let painter = painter.with_clip_rect(rect);

        painter.rect_filled(rect, 0.0, session.background());
        for drawable in session.committed() {
            drawable.render(&painter, offset);
        }
        if let Some(preview) = session.preview() {
            preview.render(&painter, offset);
        }
        painter.rect_stroke(rect, 0.0, self.frame_border);
    }
}
