//! Source-over compositing on straight-alpha RGBA8.
//!
//! Everything drawn onto the working canvas (the rotated source, text
//! coverage, the logo watermark, the padded content) goes through [`over`].

use crate::color::Rgba8;
use crate::decode::Bitmap;

pub type Rgba8Px = [u8; 4];

/// Composite `src` over `dst` with an extra opacity multiplier.
///
/// Drawing fully opaque onto a transparent pixel at opacity 1 copies the
/// source bytes verbatim, including the color of fully transparent pixels.
pub fn over(dst: Rgba8Px, src: Rgba8Px, opacity: f32) -> Rgba8Px {
    let opacity = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) };
    if opacity >= 1.0 && (dst[3] == 0 || src[3] == 255) {
        return src;
    }
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let sa = src[3] as f32 / 255.0 * opacity;
    let da = dst[3] as f32 / 255.0;
    let dst_weight = da * (1.0 - sa);
    let out_a = sa + dst_weight;
    if out_a <= 0.0 {
        return dst;
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (src[i] as f32 * sa + dst[i] as f32 * dst_weight) / out_a;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

/// Blend a solid color into one pixel with the given coverage (0..=1).
///
/// Used for antialiased glyph rendering. Out of bounds coordinates are ignored.
pub fn blend_coverage(canvas: &mut Bitmap, x: i64, y: i64, color: Rgba8, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width as i64 || y >= canvas.height as i64 {
        return;
    }
    let idx = canvas.index(x as u32, y as u32);
    let dst = [
        canvas.pixels[idx],
        canvas.pixels[idx + 1],
        canvas.pixels[idx + 2],
        canvas.pixels[idx + 3],
    ];
    let out = over(dst, color.to_array(), coverage);
    canvas.pixels[idx..idx + 4].copy_from_slice(&out);
}

/// Draw `src` onto `dst` with its top-left corner at `(x, y)`, clipping
/// whatever falls outside the destination.
pub fn draw_bitmap(dst: &mut Bitmap, src: &Bitmap, x: i64, y: i64, opacity: f32) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + src.width as i64).min(dst.width as i64);
    let y1 = (y + src.height as i64).min(dst.height as i64);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for dy in y0..y1 {
        let sy = (dy - y) as u32;
        for dx in x0..x1 {
            let sx = (dx - x) as u32;
            let s = src.pixel(sx, sy);
            let idx = dst.index(dx as u32, dy as u32);
            let d = [
                dst.pixels[idx],
                dst.pixels[idx + 1],
                dst.pixels[idx + 2],
                dst.pixels[idx + 3],
            ];
            dst.pixels[idx..idx + 4].copy_from_slice(&over(d, s, opacity));
        }
    }
}
