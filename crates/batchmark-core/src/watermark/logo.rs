//! Logo (image) watermark.

use crate::composite::{draw_bitmap, over};
use crate::decode::Bitmap;
use crate::position::fit_position;
use crate::settings::ImageWatermark;
use crate::transform::{resize, FilterType};

/// Size of the logo once scaled so its width is `size_percent` of
/// `main_width`, aspect ratio preserved. Never below 1x1.
pub fn logo_dimensions(main_width: u32, logo_width: u32, logo_height: u32, size_percent: f32) -> (u32, u32) {
    let logo_width = logo_width.max(1);
    let scale = (size_percent as f64 / 100.0) * (main_width as f64 / logo_width as f64);
    let width = (logo_width as f64 * scale).round().max(1.0) as u32;
    let height = (logo_height.max(1) as f64 * scale).round().max(1.0) as u32;
    (width, height)
}

/// Draw `logo` onto `canvas` at the watermark's position and opacity.
///
/// A logo scaled down is resized whole. A logo scaled up is sampled only
/// where it lands on the canvas, so its full scaled size is never allocated.
pub fn draw_image_watermark(canvas: &mut Bitmap, logo: &Bitmap, watermark: &ImageWatermark) {
    if logo.is_empty() || watermark.opacity <= 0.0 {
        return;
    }
    let (width, height) = logo_dimensions(canvas.width, logo.width, logo.height, watermark.size);
    let (x, y) = fit_position(
        canvas.width,
        canvas.height,
        width as f32,
        height as f32,
        watermark.position,
    );
    let (x, y) = (x.round() as i64, y.round() as i64);
    let opacity = watermark.opacity.clamp(0.0, 1.0);

    if width <= logo.width && height <= logo.height {
        match resize(logo, width, height, FilterType::Bilinear) {
            Ok(scaled) => draw_bitmap(canvas, &scaled, x, y, opacity),
            Err(e) => {
                tracing::warn!(error = %e, "could not scale watermark image, omitted");
                return;
            }
        }
    } else {
        draw_upscaled(canvas, logo, x, y, width, height, opacity);
    }

    tracing::debug!(width, height, x, y, "drew image watermark");
}

/// Bilinear upscale of `logo` to `width` x `height` at (x, y), evaluated
/// only for canvas pixels inside that rectangle.
fn draw_upscaled(
    canvas: &mut Bitmap,
    logo: &Bitmap,
    x: i64,
    y: i64,
    width: u32,
    height: u32,
    opacity: f32,
) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + width as i64).min(canvas.width as i64);
    let y1 = (y + height as i64).min(canvas.height as i64);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let fx = logo.width as f64 / width as f64;
    let fy = logo.height as f64 / height as f64;
    for dy in y0..y1 {
        let sy = ((dy - y) as f64 + 0.5) * fy - 0.5;
        for dx in x0..x1 {
            let sx = ((dx - x) as f64 + 0.5) * fx - 0.5;
            let s = sample_clamped(logo, sx, sy);
            let idx = canvas.index(dx as u32, dy as u32);
            let d = [
                canvas.pixels[idx],
                canvas.pixels[idx + 1],
                canvas.pixels[idx + 2],
                canvas.pixels[idx + 3],
            ];
            canvas.pixels[idx..idx + 4].copy_from_slice(&over(d, s, opacity));
        }
    }
}

/// Straight-alpha bilinear sample with edge clamping, the same weights a
/// triangle filter uses when enlarging.
fn sample_clamped(bitmap: &Bitmap, x: f64, y: f64) -> [u8; 4] {
    let max_x = (bitmap.width - 1) as f64;
    let max_y = (bitmap.height - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);
    let x0 = x.floor();
    let y0 = y.floor();
    let tx = x - x0;
    let ty = y - y0;
    let (x0, y0) = (x0 as u32, y0 as u32);
    let x1 = (x0 + 1).min(bitmap.width - 1);
    let y1 = (y0 + 1).min(bitmap.height - 1);

    let p00 = bitmap.pixel(x0, y0);
    let p10 = bitmap.pixel(x1, y0);
    let p01 = bitmap.pixel(x0, y1);
    let p11 = bitmap.pixel(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f64 * (1.0 - tx) + p10[c] as f64 * tx;
        let bottom = p01[c] as f64 * (1.0 - tx) + p11[c] as f64 * tx;
        out[c] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    out
}
