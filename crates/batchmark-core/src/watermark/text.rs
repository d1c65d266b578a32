//! Single-line text watermark rendering with `ab_glyph`.
//!
//! Font size follows the editor: `size / 1000 * min(width, height)` pixels
//! per em. Text is left aligned and the position is the top of the em box,
//! so the baseline sits one ascent below it. No stroke, no wrapping.

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};

use super::WatermarkError;
use crate::color::Rgba8;
use crate::composite::blend_coverage;
use crate::decode::Bitmap;
use crate::position::fit_position;
use crate::settings::TextWatermark;

/// Parse TrueType/OpenType font bytes.
pub fn load_font(bytes: Vec<u8>) -> Result<FontArc, WatermarkError> {
    FontArc::try_from_vec(bytes).map_err(|e| WatermarkError::InvalidFont(e.to_string()))
}

/// Em size in pixels for a watermark of `size` units on a `width` x
/// `height` image.
pub fn font_size_px(size: f32, width: u32, height: u32) -> f32 {
    (size / 1000.0) * width.min(height) as f32
}

/// `ab_glyph` scales by ascent-to-descent height; convert an em size to that.
fn px_scale(font: &FontArc, em_px: f32) -> PxScale {
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(em_px * font.height_unscaled() / upem),
        _ => PxScale::from(em_px),
    }
}

fn layout(font: &FontArc, scale: PxScale, text: &str) -> (Vec<(GlyphId, f32)>, f32) {
    let scaled = font.as_scaled(scale);
    let mut glyphs = Vec::new();
    let mut cursor_x = 0.0f32;
    let mut last_glyph: Option<GlyphId> = None;

    for ch in text.chars() {
        let ch = if ch.is_control() { ' ' } else { ch };
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = last_glyph {
            cursor_x += scaled.kern(prev, glyph_id);
        }
        glyphs.push((glyph_id, cursor_x));
        cursor_x += scaled.h_advance(glyph_id);
        last_glyph = Some(glyph_id);
    }

    (glyphs, cursor_x)
}

/// Advance width of `text` at an em size of `em_px`.
pub fn measure_text(font: &FontArc, text: &str, em_px: f32) -> f32 {
    layout(font, px_scale(font, em_px), text).1
}

/// Draw the text watermark onto `canvas`.
pub fn draw_text_watermark(canvas: &mut Bitmap, font: &FontArc, watermark: &TextWatermark) {
    if watermark.text.is_empty() || watermark.opacity <= 0.0 {
        return;
    }
    let em_px = font_size_px(watermark.size, canvas.width, canvas.height);
    if em_px <= 0.0 {
        return;
    }

    let color = Rgba8::parse_or(&watermark.color, Rgba8::WHITE, "textWatermark.color");
    let scale = px_scale(font, em_px);
    let ascent = font.as_scaled(scale).ascent();
    let (glyphs, width) = layout(font, scale, &watermark.text);
    let (x, y) = fit_position(canvas.width, canvas.height, width, em_px, watermark.position);
    let baseline = y + ascent;
    let opacity = watermark.opacity.clamp(0.0, 1.0);

    for (glyph_id, offset) in glyphs {
        let glyph = glyph_id.with_scale_and_position(scale, point(x + offset, baseline));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let left = bounds.min.x as i64;
            let top = bounds.min.y as i64;
            outlined.draw(|gx, gy, coverage| {
                if coverage > 0.0 {
                    blend_coverage(
                        canvas,
                        left + gx as i64,
                        top + gy as i64,
                        color,
                        coverage.min(1.0) * opacity,
                    );
                }
            });
        }
    }

    tracing::debug!(em_px, x, y, width, "drew text watermark");
}
