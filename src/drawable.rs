use egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke as EguiStroke, Vec2};

use crate::settings::{ToolKind, ToolSettings};

/// Surface-local coordinate, not clamped to the canvas.
pub type Point = Pos2;

/// Ink used for stamp glyphs. Stamps carry no colour of their own.
pub const STAMP_INK: Color32 = Color32::BLACK;

/// Freehand polyline. Points are append-only while the line is active.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLine {
    points: Vec<Point>,
    thickness: f32,
    color: Color32,
}

impl MarkerLine {
    /// Start a new line with a single sample
    pub fn new(start: Point, thickness: f32, color: Color32) -> Self {
        Self {
            points: vec![start],
            thickness,
            color,
        }
    }

    /// Build a line from an existing set of samples
    pub fn from_points(points: Vec<Point>, thickness: f32, color: Color32) -> Self {
        Self {
            points,
            thickness,
            color,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    fn render(&self, painter: &Painter, offset: Vec2) {
        let radius = self.thickness / 2.0;
        match self.points.as_slice() {
            [] => {}
            [dot] => {
                painter.circle_filled(*dot + offset, radius, self.color);
            }
            points => {
                let screen: Vec<Pos2> = points.iter().map(|p| *p + offset).collect();
                // Round caps so the ends match a bare click dot. Overlapping
                // translucent shapes would darken, so those lines stay uncapped.
                if self.color.is_opaque() {
                    painter.circle_filled(screen[0], radius, self.color);
                    painter.circle_filled(screen[screen.len() - 1], radius, self.color);
                }
                painter.add(Shape::line(
                    screen,
                    EguiStroke::new(self.thickness, self.color),
                ));
            }
        }
    }
}

/// A glyph placed on the canvas. Moving it replaces its position.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    position: Point,
    glyph: String,
    size: f32,
}

impl Stamp {
    pub fn new(position: Point, glyph: impl Into<String>, size: f32) -> Self {
        Self {
            position,
            glyph: glyph.into(),
            size,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    fn render(&self, painter: &Painter, offset: Vec2) {
        render_glyph(painter, self.position + offset, &self.glyph, self.size, STAMP_INK);
    }
}

/// Paint a glyph centred on `center`
pub(crate) fn render_glyph(painter: &Painter, center: Pos2, glyph: &str, size: f32, color: Color32) {
    if glyph.is_empty() || size <= 0.0 {
        return;
    }
    painter.text(
        center,
        Align2::CENTER_CENTER,
        glyph,
        FontId::proportional(size),
        color,
    );
}

/// A committed visual unit. Styling is captured when it is created.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Stroke(MarkerLine),
    Stamp(Stamp),
}

impl Drawable {
    /// Create the drawable the current tool would produce at `at`
    pub fn from_settings(settings: &ToolSettings, at: Point) -> Self {
        match settings.tool {
            ToolKind::Brush => {
                Drawable::Stroke(MarkerLine::new(at, settings.thickness, settings.color))
            }
            ToolKind::Stamp => Drawable::Stamp(Stamp::new(
                at,
                settings.glyph.clone(),
                settings.stamp_size(),
            )),
        }
    }

    /// Feed a new pointer sample: lines grow, stamps jump.
    pub fn incorporate(&mut self, point: Point) {
        match self {
            Drawable::Stroke(line) => line.points.push(point),
            Drawable::Stamp(stamp) => stamp.position = point,
        }
    }

    /// Paint using the captured parameters. `offset` maps surface-local
    /// coordinates to screen space.
    pub fn render(&self, painter: &Painter, offset: Vec2) {
        match self {
            Drawable::Stroke(line) => line.render(painter, offset),
            Drawable::Stamp(stamp) => stamp.render(painter, offset),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Drawable::Stroke(_) => ToolKind::Brush,
            Drawable::Stamp(_) => ToolKind::Stamp,
        }
    }

    pub fn as_stroke(&self) -> Option<&MarkerLine> {
        match self {
            Drawable::Stroke(line) => Some(line),
            Drawable::Stamp(_) => None,
        }
    }

    pub fn as_stamp(&self) -> Option<&Stamp> {
        match self {
            Drawable::Stamp(stamp) => Some(stamp),
            Drawable::Stroke(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_stroke_accumulates_points() {
        let mut drawable = Drawable::Stroke(MarkerLine::new(pos2(0.0, 0.0), 2.0, Color32::RED));
        drawable.incorporate(pos2(5.0, 5.0));
        drawable.incorporate(pos2(7.0, 3.0));

        let line = drawable.as_stroke().unwrap();
        assert_eq!(
            line.points(),
            &[pos2(0.0, 0.0), pos2(5.0, 5.0), pos2(7.0, 3.0)]
        );
        assert_eq!(line.thickness(), 2.0);
        assert_eq!(line.color(), Color32::RED);
    }

    #[test]
    fn test_stamp_replaces_position() {
        let mut drawable = Drawable::Stamp(Stamp::new(pos2(1.0, 1.0), "★", 12.0));
        drawable.incorporate(pos2(20.0, 30.0));
        drawable.incorporate(pos2(40.0, 10.0));

        let stamp = drawable.as_stamp().unwrap();
        assert_eq!(stamp.position(), pos2(40.0, 10.0));
        assert_eq!(stamp.glyph(), "★");
        assert_eq!(stamp.size(), 12.0);
    }

    #[test]
    fn test_from_settings_captures_tool_parameters() {
        let mut settings = ToolSettings {
            thickness: 6.0,
            color: Color32::GREEN,
            ..Default::default()
        };
        let stroke = Drawable::from_settings(&settings, pos2(3.0, 4.0));
        assert_eq!(stroke.kind(), ToolKind::Brush);
        assert_eq!(stroke.as_stroke().unwrap().points(), &[pos2(3.0, 4.0)]);

        settings.tool = ToolKind::Stamp;
        settings.glyph = "🌟".to_owned();
        let stamp = Drawable::from_settings(&settings, pos2(3.0, 4.0));
        let stamp = stamp.as_stamp().unwrap();
        assert_eq!(stamp.size(), 18.0);
        assert_eq!(stamp.glyph(), "🌟");
    }

    #[test]
    fn test_empty_stroke_renders_nothing() {
        let ctx = egui::Context::default();
        let rect = egui::Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(64.0, 64.0));
        let painter = Painter::new(ctx, egui::LayerId::background(), rect);
        let line = MarkerLine::from_points(Vec::new(), 3.0, Color32::BLUE);

        Drawable::Stroke(line).render(&painter, Vec2::ZERO);
    }
}
