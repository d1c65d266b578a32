//! Color adjustment filters
//!
//! Applies brightness, contrast and saturation to RGBA pixel data with the
//! semantics of the CSS filter functions of the same names. Values are
//! percentages where 100 is the identity.
//!
//! ## Adjustment Order
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation
//!
//! Each filter clamps its output to the displayable range before the next
//! one runs. Alpha is never touched.

use crate::luminance::calculate_luminance;
use crate::settings::{EditorSettings, PERCENT_IDENTITY, PERCENT_RANGE};

/// The three color filter amounts, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorAdjustments {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
}

impl Default for ColorAdjustments {
    fn default() -> Self {
        Self {
            brightness: PERCENT_IDENTITY,
            contrast: PERCENT_IDENTITY,
            saturation: PERCENT_IDENTITY,
        }
    }
}

impl ColorAdjustments {
    pub fn new(brightness: f32, contrast: f32, saturation: f32) -> Self {
        Self {
            brightness,
            contrast,
            saturation,
        }
    }

    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self::new(settings.brightness, settings.contrast, settings.saturation)
    }

    /// True when every filter is at 100%.
    pub fn is_neutral(&self) -> bool {
        self.brightness == PERCENT_IDENTITY
            && self.contrast == PERCENT_IDENTITY
            && self.saturation == PERCENT_IDENTITY
    }

    fn factors(&self) -> (f32, f32, f32) {
        let to_factor = |v: f32| {
            if v.is_nan() {
                1.0
            } else {
                v.clamp(PERCENT_RANGE.0, PERCENT_RANGE.1) / 100.0
            }
        };
        (
            to_factor(self.brightness),
            to_factor(self.contrast),
            to_factor(self.saturation),
        )
    }
}

/// Apply the color filters to RGBA pixel data in place.
///
/// Leaves the buffer bit identical when the adjustments are neutral.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `adjustments` - Filter amounts in percent
pub fn apply_color_adjustments(pixels: &mut [u8], adjustments: &ColorAdjustments) {
    if adjustments.is_neutral() {
        return;
    }
    let (brightness, contrast, saturation) = adjustments.factors();

    for chunk in pixels.chunks_exact_mut(4) {
        let mut r = chunk[0] as f32 / 255.0;
        let mut g = chunk[1] as f32 / 255.0;
        let mut b = chunk[2] as f32 / 255.0;

        (r, g, b) = apply_brightness(r, g, b, brightness);
        (r, g, b) = apply_contrast(r, g, b, contrast);
        (r, g, b) = apply_saturation(r, g, b, saturation);

        chunk[0] = to_u8(r);
        chunk[1] = to_u8(g);
        chunk[2] = to_u8(b);
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn clamp3(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
}

/// Linear brightness.
///
/// Formula: `output = input * factor`
#[inline]
fn apply_brightness(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    if factor == 1.0 {
        return (r, g, b);
    }
    clamp3(r * factor, g * factor, b * factor)
}

/// Contrast about mid gray.
///
/// Formula: `output = (input - 0.5) * factor + 0.5`
#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    if factor == 1.0 {
        return (r, g, b);
    }
    let midpoint = 0.5;
    clamp3(
        (r - midpoint) * factor + midpoint,
        (g - midpoint) * factor + midpoint,
        (b - midpoint) * factor + midpoint,
    )
}

/// Saturation relative to the pixel's luminance. 0 gives grayscale,
/// values above 1 push colors away from gray.
#[inline]
fn apply_saturation(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    if factor == 1.0 {
        return (r, g, b);
    }
    let gray = calculate_luminance(r, g, b);
    clamp3(
        gray + (r - gray) * factor,
        gray + (g - gray) * factor,
        gray + (b - gray) * factor,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(r: u8, g: u8, b: u8) -> Vec<u8> {
        vec![r, g, b, 255]
    }

    fn apply(pixels: &[u8], adj: ColorAdjustments) -> Vec<u8> {
        let mut result = pixels.to_vec();
        apply_color_adjustments(&mut result, &adj);
        result
    }

    // ===== Identity Tests =====

    #[test]
    fn test_identity_no_adjustments() {
        let pixels = vec![128, 64, 192, 255, 1, 2, 3, 0, 255, 255, 255, 17];
        assert_eq!(apply(&pixels, ColorAdjustments::default()), pixels);
    }

    #[test]
    fn test_from_settings() {
        let mut settings = EditorSettings::default();
        assert!(ColorAdjustments::from_settings(&settings).is_neutral());
        settings.contrast = 120.0;
        let adj = ColorAdjustments::from_settings(&settings);
        assert!(!adj.is_neutral());
        assert_eq!(adj.contrast, 120.0);
    }

    // ===== Brightness =====

    #[test]
    fn test_brightness_half() {
        let result = apply(&pixel(200, 100, 50), ColorAdjustments::new(50.0, 100.0, 100.0));
        assert_eq!(result, pixel(100, 50, 25));
    }

    #[test]
    fn test_brightness_zero_is_black() {
        let result = apply(&pixel(200, 100, 50), ColorAdjustments::new(0.0, 100.0, 100.0));
        assert_eq!(result, pixel(0, 0, 0));
    }

    #[test]
    fn test_brightness_clips_at_white() {
        let result = apply(&pixel(200, 100, 50), ColorAdjustments::new(200.0, 100.0, 100.0));
        assert_eq!(result, pixel(255, 200, 100));
    }

    // ===== Contrast =====

    #[test]
    fn test_contrast_zero_is_mid_gray() {
        let result = apply(&pixel(10, 200, 255), ColorAdjustments::new(100.0, 0.0, 100.0));
        assert_eq!(result, pixel(128, 128, 128));
    }

    #[test]
    fn test_contrast_increase_spreads_values() {
        let result = apply(&pixel(64, 128, 192), ColorAdjustments::new(100.0, 150.0, 100.0));
        assert!(result[0] < 64);
        assert!(result[2] > 192);
    }

    // ===== Saturation =====

    #[test]
    fn test_saturation_zero_is_gray() {
        let result = apply(&pixel(255, 0, 0), ColorAdjustments::new(100.0, 100.0, 0.0));
        assert_eq!(result[0], result[1]);
        assert_eq!(result[1], result[2]);
        // 0.2126 * 255 ≈ 54.2
        assert_eq!(result[0], 54);
    }

    #[test]
    fn test_saturation_increase() {
        let result = apply(&pixel(150, 100, 100), ColorAdjustments::new(100.0, 100.0, 150.0));
        assert!(result[0] > 150);
        assert!(result[1] < 100);
    }

    #[test]
    fn test_saturation_leaves_gray_alone() {
        let result = apply(&pixel(90, 90, 90), ColorAdjustments::new(100.0, 100.0, 200.0));
        assert_eq!(result, pixel(90, 90, 90));
    }

    // ===== Combined =====

    #[test]
    fn test_order_brightness_before_contrast() {
        // brightness 50%: 200 -> 100, then contrast 0%: everything -> 128
        let result = apply(&pixel(200, 200, 200), ColorAdjustments::new(50.0, 0.0, 100.0));
        assert_eq!(result, pixel(128, 128, 128));
    }

    #[test]
    fn test_alpha_untouched() {
        let pixels = vec![100, 150, 200, 42, 10, 20, 30, 0];
        let result = apply(&pixels, ColorAdjustments::new(130.0, 70.0, 160.0));
        assert_eq!(result[3], 42);
        assert_eq!(result[7], 0);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let a = apply(&pixel(100, 50, 25), ColorAdjustments::new(500.0, 100.0, 100.0));
        let b = apply(&pixel(100, 50, 25), ColorAdjustments::new(200.0, 100.0, 100.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_pixels() {
        let mut pixels: Vec<u8> = vec![];
        apply_color_adjustments(&mut pixels, &ColorAdjustments::new(150.0, 150.0, 150.0));
        assert!(pixels.is_empty());
    }

    #[test]
    fn test_incomplete_pixel_ignored() {
        let mut pixels = vec![200, 200, 200, 255, 10, 20];
        apply_color_adjustments(&mut pixels, &ColorAdjustments::new(50.0, 100.0, 100.0));
        assert_eq!(pixels, vec![100, 100, 100, 255, 10, 20]);
    }
}
