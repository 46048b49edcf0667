//! Rasterises committed drawables into a PNG.
//!
//! Strokes are built as a coverage mask of discs along each segment and
//! blended once. Glyphs are drawn with `ab_glyph` using the fonts egui embeds
//! by default. Everything is scaled uniformly from the native canvas size to the requested edge length.

use std::borrow::Cow;
use std::io::Cursor;

use ab_glyph::{Font, FontArc, FontRef, FontVec, ScaleFont, point};
use egui::{Color32, Pos2, Vec2};
use image::{ImageFormat, Rgba, RgbaImage};
use log::{info, warn};

use crate::drawable::{Drawable, MarkerLine, STAMP_INK, Stamp};
use crate::error::ExportError;

/// Largest export accepted, in pixels (16384 x 16384)
pub const MAX_EXPORT_PIXELS: u64 = 16384 * 16384;

/// Render `drawables` at `target_size / canvas.x` scale and encode as PNG.
pub fn export_png(
    drawables: &[Drawable],
    canvas: Vec2,
    target_size: u32,
    background: Color32,
) -> Result<Vec<u8>, ExportError> {
    let image = rasterize(drawables, canvas, target_size, background)?;
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    info!(
        "Exported {} drawables at {}x{}",
        drawables.len(),
        image.width(),
        image.height()
    );
    Ok(buf.into_inner())
}

/// Render `drawables` onto an opaque background, in order.
pub fn rasterize(
    drawables: &[Drawable],
    canvas: Vec2,
    target_size: u32,
    background: Color32,
) -> Result<RgbaImage, ExportError> {
    if target_size == 0 {
        return Err(ExportError::InvalidSize);
    }
    if canvas.x <= 0.0 || canvas.y <= 0.0 {
        return Err(ExportError::EmptyCanvas {
            width: canvas.x,
            height: canvas.y,
        });
    }

    let scale = target_size as f32 / canvas.x;
    // Float to int casts saturate, so oversized requests land on u32::MAX
    let width = (canvas.x * scale).round().max(1.0) as u32;
    let height = (canvas.y * scale).round().max(1.0) as u32;
    if u64::from(width) * u64::from(height) > MAX_EXPORT_PIXELS {
        return Err(ExportError::TooLarge { width, height });
    }
    let [r, g, b, _] = background.to_srgba_unmultiplied();
    let mut img = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));

    let mut fonts: Option<GlyphFonts> = None;
    for drawable in drawables {
        match drawable {
            Drawable::Stroke(line) => draw_marker_line(&mut img, line, scale),
            Drawable::Stamp(stamp) => {
                let fonts = fonts.get_or_insert_with(GlyphFonts::egui_defaults);
                draw_stamp(&mut img, fonts, stamp, scale);
            }
        }
    }
    Ok(img)
}

fn draw_marker_line(img: &mut RgbaImage, line: &MarkerLine, scale: f32) {
    let radius = line.thickness() * scale / 2.0;
    let points: Vec<Pos2> = line.points().iter().map(|p| scale_point(*p, scale)).collect();
    let Some(mut mask) = CoverageMask::around(img, &points, radius) else {
        return;
    };
    match points.as_slice() {
        [] => {}
        [dot] => mask.disc(*dot, radius),
        points => {
            for segment in points.windows(2) {
                mask.segment(segment[0], segment[1], radius);
            }
        }
    }
    mask.fill(img, line.color());
}

fn draw_stamp(img: &mut RgbaImage, fonts: &GlyphFonts, stamp: &Stamp, scale: f32) {
    draw_glyphs(
        img,
        fonts,
        scale_point(stamp.position(), scale),
        stamp.glyph(),
        stamp.size() * scale,
        STAMP_INK,
    );
}

fn scale_point(pos: Pos2, scale: f32) -> Pos2 {
    Pos2::new(pos.x * scale, pos.y * scale)
}

fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: Color32) {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 0 {
        return;
    }
    let dst = img.get_pixel(x, y).0;
    let src_a = a as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }
    let blend = |src: u8, dst: u8| {
        let src_f = src as f32 / 255.0;
        let dst_f = dst as f32 / 255.0;
        ((src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a * 255.0)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    img.put_pixel(
        x,
        y,
        Rgba([
            blend(r, dst[0]),
            blend(g, dst[1]),
            blend(b, dst[2]),
            (out_a * 255.0).round() as u8,
        ]),
    );
}

/// Pixels covered by one stroke, so each pixel is blended exactly once
/// however many discs overlap it
struct CoverageMask {
    min_x: u32,
    min_y: u32,
    width: u32,
    height: u32,
    covered: Vec<bool>,
}

impl CoverageMask {
    /// Mask over the part of `img` the discs along `points` can reach
    fn around(img: &RgbaImage, points: &[Pos2], radius: f32) -> Option<Self> {
        let radius = radius.max(0.5);
        let (mut lo, mut hi) = (Pos2::new(f32::MAX, f32::MAX), Pos2::new(f32::MIN, f32::MIN));
        for p in points {
            lo = lo.min(*p);
            hi = hi.max(*p);
        }
        if points.is_empty() || img.width() == 0 || img.height() == 0 {
            return None;
        }
        let min_x = (lo.x - radius).floor().max(0.0);
        let min_y = (lo.y - radius).floor().max(0.0);
        let max_x = (hi.x + radius).ceil().min((img.width() - 1) as f32);
        let max_y = (hi.y + radius).ceil().min((img.height() - 1) as f32);
        if max_x < min_x || max_y < min_y {
            return None;
        }
        let width = (max_x - min_x) as u32 + 1;
        let height = (max_y - min_y) as u32 + 1;
        Some(Self {
            min_x: min_x as u32,
            min_y: min_y as u32,
            width,
            height,
            covered: vec![false; width as usize * height as usize],
        })
    }

    fn disc(&mut self, center: Pos2, radius: f32) {
        // Sub-pixel lines still cover the pixel they pass through
        let radius = radius.max(0.5);
        let radius_sq = radius * radius;
        let left = self.min_x as f32;
        let top = self.min_y as f32;
        let min_x = (center.x - radius - left).floor().max(0.0) as u32;
        let min_y = (center.y - radius - top).floor().max(0.0) as u32;
        let max_x = ((center.x + radius - left).ceil().max(0.0) as u32).min(self.width - 1);
        let max_y = ((center.y + radius - top).ceil().max(0.0) as u32).min(self.height - 1);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = left + x as f32 + 0.5 - center.x;
                let dy = top + y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= radius_sq {
                    self.covered[(y * self.width + x) as usize] = true;
                }
            }
        }
    }

    fn segment(&mut self, start: Pos2, end: Pos2, radius: f32) {
        let delta = end - start;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as i32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.disc(start + delta * t, radius);
        }
    }

    fn fill(&self, img: &mut RgbaImage, color: Color32) {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.covered[(y * self.width + x) as usize] {
                    blend_pixel(img, self.min_x + x, self.min_y + y, color);
                }
            }
        }
    }
}

/// Font faces from egui's proportional family, in fallback order
struct GlyphFonts {
    faces: Vec<(FontArc, f32)>,
}

impl GlyphFonts {
    fn egui_defaults() -> Self {
        let definitions = egui::FontDefinitions::default();
        let names = definitions
            .families
            .get(&egui::FontFamily::Proportional)
            .cloned()
            .unwrap_or_default();

        let mut faces = Vec::new();
        for name in names {
            let Some(data) = definitions.font_data.get(&name) else {
                continue;
            };
            let font = match &data.font {
                Cow::Borrowed(bytes) => FontRef::try_from_slice_and_index(*bytes, data.index)
                    .map(FontArc::from)
                    .ok(),
                Cow::Owned(bytes) => FontVec::try_from_vec_and_index(bytes.clone(), data.index)
                    .map(FontArc::from)
                    .ok(),
            };
            match font {
                Some(font) => faces.push((font, data.tweak.scale)),
                None => warn!("Skipping unreadable font {name}"),
            }
        }
        Self { faces }
    }

    /// First face that actually has a glyph for `ch`
    fn face_for(&self, ch: char) -> Option<&(FontArc, f32)> {
        self.faces.iter().find(|(font, _)| font.glyph_id(ch).0 != 0)
    }
}

/// Draw `text` centred on `center`, falling back across faces per character
fn draw_glyphs(
    img: &mut RgbaImage,
    fonts: &GlyphFonts,
    center: Pos2,
    text: &str,
    size: f32,
    color: Color32,
) {
    if text.is_empty() || size <= 0.0 {
        return;
    }

    let placed: Vec<_> = text
        .chars()
        .filter_map(|ch| fonts.face_for(ch).map(|(font, tweak)| (ch, font, size * tweak)))
        .collect();
    if placed.is_empty() {
        warn!("No font covers {text:?}");
        return;
    }

    let width: f32 = placed
        .iter()
        .map(|(ch, font, px)| {
            let scaled = font.as_scaled(*px);
            scaled.h_advance(scaled.glyph_id(*ch))
        })
        .sum();
    let (ascent, descent) = placed
        .iter()
        .map(|(_, font, px)| {
            let scaled = font.as_scaled(*px);
            (scaled.ascent(), scaled.descent())
        })
        .fold((0.0f32, 0.0f32), |(a, d), (sa, sd)| (a.max(sa), d.min(sd)));

    let baseline = center.y + (ascent + descent) / 2.0;
    let mut caret_x = center.x - width / 2.0;
    let [r, g, b, a] = color.to_srgba_unmultiplied();

    for (ch, font, px) in placed {
        let scaled = font.as_scaled(px);
        let mut glyph = scaled.scaled_glyph(ch);
        glyph.position = point(caret_x, baseline);
        caret_x += scaled.h_advance(glyph.id);

        let Some(outlined) = scaled.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|x, y, coverage| {
            let px = x as i32 + bounds.min.x as i32;
            let py = y as i32 + bounds.min.y as i32;
            if px >= 0 && py >= 0 && px < img.width() as i32 && py < img.height() as i32 {
                let alpha = (a as f32 * coverage).round().clamp(0.0, 255.0) as u8;
                blend_pixel(
                    img,
                    px as u32,
                    py as u32,
                    Color32::from_rgba_unmultiplied(r, g, b, alpha),
                );
            }
        });
    }
}
