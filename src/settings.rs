use egui::Color32;

/// Which kind of drawable the next pointer-down creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Brush,
    Stamp,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Stamp => "Stamp",
        }
    }
}

/// Process-wide tool parameters, read only when a drawable or preview is created.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub thickness: f32,
    pub color: Color32,
    pub glyph: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::Brush,
            thickness: 4.0,
            color: Color32::BLACK,
            glyph: "😀".to_owned(),
        }
    }
}

impl ToolSettings {
    /// Radius of the brush preview ring
    pub fn ring_radius(&self) -> f32 {
        (self.thickness / 2.0).max(1.0)
    }

    /// Font size used for stamps and the ghost stamp preview
    pub fn stamp_size(&self) -> f32 {
        self.thickness * 3.0
    }
}
