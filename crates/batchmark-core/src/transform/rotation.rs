//! Small-angle rotation about the image center.
//!
//! The rotated source is drawn onto a canvas of the same size. Corners that
//! swing outside are clipped, and areas the source no longer covers keep
//! whatever the canvas already holds (transparent, or white for JPEG).
//!
//! # Algorithm
//!
//! Inverse mapping through pixel centers. For each canvas pixel the source
//! position is
//! ```text
//! src_x =  (dst_x + 0.5 - cx) * cos θ + (dst_y + 0.5 - cy) * sin θ + cx - 0.5
//! src_y = -(dst_x + 0.5 - cx) * sin θ + (dst_y + 0.5 - cy) * cos θ + cy - 0.5
//! ```
//! with θ positive for a clockwise turn on screen. Samples are bilinear in
//! premultiplied space; positions outside the source read as transparent,
//! which antialiases the rotated edges.

use crate::composite::over;
use crate::decode::Bitmap;

/// Draw `source` rotated by `angle_degrees` (clockwise positive) onto
/// `canvas`, centered.
///
/// At 0° every sample lands exactly on a source pixel, so the draw
/// reproduces the source bytes.
pub fn rotate_onto(canvas: &mut Bitmap, source: &Bitmap, angle_degrees: f64) {
    let angle_rad = if angle_degrees.is_finite() {
        angle_degrees.to_radians()
    } else {
        0.0
    };
    let (sin, cos) = angle_rad.sin_cos();

    let src_cx = source.width as f64 / 2.0;
    let src_cy = source.height as f64 / 2.0;
    let dst_cx = canvas.width as f64 / 2.0;
    let dst_cy = canvas.height as f64 / 2.0;

    for dst_y in 0..canvas.height {
        for dst_x in 0..canvas.width {
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos + dy * sin + src_cx - 0.5;
            let src_y = -dx * sin + dy * cos + src_cy - 0.5;

            let sample = sample_bilinear(source, src_x, src_y);
            let idx = canvas.index(dst_x, dst_y);
            let dst = [
                canvas.pixels[idx],
                canvas.pixels[idx + 1],
                canvas.pixels[idx + 2],
                canvas.pixels[idx + 3],
            ];
            canvas.pixels[idx..idx + 4].copy_from_slice(&over(dst, sample, 1.0));
        }
    }
}

/// Sample a pixel using bilinear interpolation.
///
/// The 4 nearest pixels are weighted by distance. Neighbors outside the
/// image count as transparent black. Color is averaged by alpha weight; when
/// every contributing neighbor is transparent the plain color average is
/// used instead so fully transparent regions keep their color bytes.
fn sample_bilinear(image: &Bitmap, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (image.width as i64, image.height as i64);

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    let mut premul = [0.0f64; 3];
    let mut plain = [0.0f64; 3];
    let mut alpha = 0.0f64;
    let mut coverage = 0.0f64;

    for (px, py, weight) in taps {
        if weight <= 0.0 || px < 0 || py < 0 || px >= w || py >= h {
            continue;
        }
        let p = image.pixel(px as u32, py as u32);
        let a = p[3] as f64;
        for i in 0..3 {
            premul[i] += p[i] as f64 * a * weight;
            plain[i] += p[i] as f64 * weight;
        }
        alpha += a * weight;
        coverage += weight;
    }

    let mut out = [0u8; 4];
    if alpha > 0.0 {
        for i in 0..3 {
            out[i] = (premul[i] / alpha).round().clamp(0.0, 255.0) as u8;
        }
        out[3] = alpha.round().clamp(0.0, 255.0) as u8;
    } else if coverage > 0.0 {
        for i in 0..3 {
            out[i] = (plain[i] / coverage).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;

    fn test_image(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width.max(1)) as u8);
                pixels.push((y * 255 / height.max(1)) as u8);
                pixels.push(((x + y) % 256) as u8);
                pixels.push(255);
            }
        }
        Bitmap::new(width, height, pixels)
    }

    #[test]
    fn test_zero_rotation_reproduces_source() {
        let source = test_image(17, 9);
        let mut canvas = Bitmap::transparent(17, 9);
        rotate_onto(&mut canvas, &source, 0.0);
        assert_eq!(canvas, source);
    }

    #[test]
    fn test_zero_rotation_keeps_transparent_pixels() {
        let source = Bitmap::new(2, 1, vec![1, 2, 3, 0, 200, 100, 50, 128]);
        let mut canvas = Bitmap::transparent(2, 1);
        rotate_onto(&mut canvas, &source, 0.0);
        assert_eq!(canvas, source);
    }

    #[test]
    fn test_rotation_keeps_canvas_size() {
        let source = test_image(40, 20);
        let mut canvas = Bitmap::transparent(40, 20);
        rotate_onto(&mut canvas, &source, 5.0);
        assert_eq!((canvas.width, canvas.height), (40, 20));
        assert_eq!(canvas.pixels.len(), 40 * 20 * 4);
    }

    #[test]
    fn test_rotation_exposes_corners() {
        let source = Bitmap::filled(60, 60, Rgba8::new(255, 0, 0, 255));

        let mut canvas = Bitmap::transparent(60, 60);
        rotate_onto(&mut canvas, &source, 5.0);
        assert_eq!(canvas.pixel(0, 0)[3], 0);
        assert_eq!(canvas.pixel(30, 30), [255, 0, 0, 255]);

        let mut white = Bitmap::filled(60, 60, Rgba8::WHITE);
        rotate_onto(&mut white, &source, -5.0);
        assert_eq!(white.pixel(59, 0), [255, 255, 255, 255]);
        assert_eq!(white.pixel(30, 30), [255, 0, 0, 255]);
    }

    #[test]
    fn test_rotation_is_clockwise() {
        // A single marker pixel right of center moves down when turned clockwise.
        let mut source = Bitmap::filled(41, 41, Rgba8::BLACK);
        let marker = source.index(35, 20);
        source.pixels[marker..marker + 4].copy_from_slice(&[255, 255, 255, 255]);

        let mut canvas = Bitmap::transparent(41, 41);
        rotate_onto(&mut canvas, &source, 90.0);

        let below = canvas.pixel(20, 35);
        let above = canvas.pixel(20, 5);
        assert!(below[0] > 200, "marker expected below center, got {:?}", below);
        assert!(above[0] < 50);
    }

    #[test]
    fn test_center_pixel_fixed() {
        let source = test_image(21, 21);
        let mut canvas = Bitmap::transparent(21, 21);
        rotate_onto(&mut canvas, &source, 3.0);
        assert_eq!(canvas.pixel(10, 10), source.pixel(10, 10));
    }

    #[test]
    fn test_sample_outside_is_transparent() {
        let img = test_image(4, 4);
        assert_eq!(sample_bilinear(&img, -5.0, 1.0), [0, 0, 0, 0]);
        assert_eq!(sample_bilinear(&img, 1.0, 10.0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_sample_half_outside_halves_alpha() {
        let img = Bitmap::filled(4, 4, Rgba8::new(100, 150, 200, 255));
        let px = sample_bilinear(&img, -0.5, 1.0);
        assert_eq!(&px[0..3], &[100, 150, 200]);
        assert!((px[3] as i32 - 128).abs() <= 1);
    }
}
