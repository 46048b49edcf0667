use egui::Color32;

use crate::drawable::Point;

/// Payload of the pointer-hint signal
#[derive(Debug, Clone, PartialEq)]
pub struct PointerHint {
    pub position: Point,
    pub thickness: f32,
    /// Only present while the brush tool is selected
    pub color: Option<Color32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Committed, undone, the active drawable or the preview changed.
    /// Receivers re-read the whole session and redraw from scratch.
    StateChanged,
    /// Emitted on every pointer move
    PointerHint(PointerHint),
}
