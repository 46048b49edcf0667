use egui::{Color32, Painter, Stroke as EguiStroke, Vec2};

use crate::drawable::{Point, STAMP_INK, render_glyph};
use crate::settings::{ToolKind, ToolSettings};

/// Opacity of the ghost stamp relative to a committed stamp
pub const GHOST_OPACITY: f32 = 0.4;

/// Outline width of the brush ring
const RING_WIDTH: f32 = 1.0;

/// What the active tool would draw next. Never committed, never exported.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Ring {
        center: Point,
        radius: f32,
        color: Color32,
    },
    Ghost {
        center: Point,
        glyph: String,
        size: f32,
    },
}

impl Preview {
    pub fn from_settings(settings: &ToolSettings, at: Point) -> Self {
        match settings.tool {
            ToolKind::Brush => Preview::Ring {
                center: at,
                radius: settings.ring_radius(),
                color: settings.color,
            },
            ToolKind::Stamp => Preview::Ghost {
                center: at,
                glyph: settings.glyph.clone(),
                size: settings.stamp_size(),
            },
        }
    }

    pub fn center(&self) -> Point {
        match self {
            Preview::Ring { center, .. } | Preview::Ghost { center, .. } => *center,
        }
    }

    pub fn render(&self, painter: &Painter, offset: Vec2) {
        match self {
            Preview::Ring {
                center,
                radius,
                color,
            } => {
                painter.circle_stroke(*center + offset, *radius, EguiStroke::new(RING_WIDTH, *color));
            }
            Preview::Ghost { center, glyph, size } => {
                render_glyph(
                    painter,
                    *center + offset,
                    glyph,
                    *size,
                    STAMP_INK.gamma_multiply(GHOST_OPACITY),
                );
            }
        }
    }
}
