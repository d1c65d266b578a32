//! Editor settings: the immutable per-request configuration of the pipeline.
//!
//! Field names serialize in camelCase so the value round-trips with the
//! front end's JSON unchanged. Every field has a default, and
//! [`EditorSettings::clamped`] pulls out-of-range numbers back to the nearest
//! valid bound instead of rejecting them.

use serde::{Deserialize, Serialize};

use crate::encode::OutputFormat;

/// Rotation range in degrees (fine straightening only).
pub const ROTATION_RANGE: (f32, f32) = (-5.0, 5.0);
/// Brightness/contrast/saturation range in percent.
pub const PERCENT_RANGE: (f32, f32) = (0.0, 200.0);
/// Neutral value for brightness/contrast/saturation.
pub const PERCENT_IDENTITY: f32 = 100.0;
/// Noise amount range.
pub const NOISE_RANGE: (f32, f32) = (0.0, 100.0);
/// Text watermark size range, in thousandths of the short image edge.
pub const FONT_SIZE_RANGE: (f32, f32) = (10.0, 100.0);
/// Image watermark width range, in percent of the main image width.
pub const WATERMARK_SIZE_RANGE: (f32, f32) = (1.0, 50.0);
/// Output quality range.
pub const QUALITY_RANGE: (f32, f32) = (1.0, 100.0);
/// Smallest padding target dimension in pixels. There is no upper bound.
pub const MIN_PADDING_DIMENSION: u32 = 1;

/// Absolute top-left placement of a watermark, in source image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WatermarkPosition {
    pub x: f32,
    pub y: f32,
}

impl WatermarkPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Text watermark settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextWatermark {
    pub text: String,
    /// CSS hex color
    pub color: String,
    /// Font size in thousandths of `min(width, height)` (10 to 100)
    pub size: f32,
    /// Opacity (0.0 to 1.0)
    pub opacity: f32,
    pub position: WatermarkPosition,
}

impl Default for TextWatermark {
    fn default() -> Self {
        Self {
            text: "© 你的品牌".to_string(),
            color: "#ffffff".to_string(),
            size: 48.0,
            opacity: 0.7,
            position: WatermarkPosition::new(400.0, 400.0),
        }
    }
}

/// Image (logo) watermark settings. The logo bitmap itself travels
/// separately from the settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageWatermark {
    /// Width as a percentage of the main image width (1 to 50)
    pub size: f32,
    /// Opacity (0.0 to 1.0)
    pub opacity: f32,
    pub position: WatermarkPosition,
}

impl Default for ImageWatermark {
    fn default() -> Self {
        Self {
            size: 15.0,
            opacity: 0.7,
            position: WatermarkPosition::new(200.0, 200.0),
        }
    }
}

/// Letterbox settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingSettings {
    pub enabled: bool,
    /// Target canvas width in pixels
    pub width: u32,
    /// Target canvas height in pixels
    pub height: u32,
    /// CSS hex background color
    pub color: String,
}

impl Default for PaddingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 1200,
            height: 1600,
            color: "#ffffff".to_string(),
        }
    }
}

/// Everything one pipeline invocation needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    /// Rotation in degrees, clockwise positive (-5 to 5)
    pub rotation: f32,
    pub is_text_watermark_enabled: bool,
    pub text_watermark: TextWatermark,
    pub is_image_watermark_enabled: bool,
    pub image_watermark: ImageWatermark,
    /// Brightness percent (0 to 200, 100 = unchanged)
    pub brightness: f32,
    /// Contrast percent (0 to 200, 100 = unchanged)
    pub contrast: f32,
    /// Saturation percent (0 to 200, 100 = unchanged)
    pub saturation: f32,
    /// Noise amount (0 to 100, 0 = off)
    pub noise: f32,
    /// Output quality (1 to 100), used by lossy encoders
    pub output_quality: f32,
    pub output_format: OutputFormat,
    pub padding: PaddingSettings,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            is_text_watermark_enabled: false,
            text_watermark: TextWatermark::default(),
            is_image_watermark_enabled: false,
            image_watermark: ImageWatermark::default(),
            brightness: PERCENT_IDENTITY,
            contrast: PERCENT_IDENTITY,
            saturation: PERCENT_IDENTITY,
            noise: 0.0,
            output_quality: 92.0,
            output_format: OutputFormat::Jpeg,
            padding: PaddingSettings::default(),
        }
    }
}

impl EditorSettings {
    /// Create settings with the editor's initial values
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with every numeric field pulled into its valid range.
    ///
    /// NaN values fall back to the field's default.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let mut out = self.clone();

        out.rotation = clamp_or(self.rotation, ROTATION_RANGE, defaults.rotation);
        out.brightness = clamp_or(self.brightness, PERCENT_RANGE, PERCENT_IDENTITY);
        out.contrast = clamp_or(self.contrast, PERCENT_RANGE, PERCENT_IDENTITY);
        out.saturation = clamp_or(self.saturation, PERCENT_RANGE, PERCENT_IDENTITY);
        out.noise = clamp_or(self.noise, NOISE_RANGE, defaults.noise);
        out.output_quality = clamp_or(self.output_quality, QUALITY_RANGE, defaults.output_quality);

        let text = &self.text_watermark;
        out.text_watermark.size = clamp_or(text.size, FONT_SIZE_RANGE, defaults.text_watermark.size);
        out.text_watermark.opacity = clamp_or(text.opacity, (0.0, 1.0), defaults.text_watermark.opacity);
        out.text_watermark.position = finite_position(text.position);

        let logo = &self.image_watermark;
        out.image_watermark.size =
            clamp_or(logo.size, WATERMARK_SIZE_RANGE, defaults.image_watermark.size);
        out.image_watermark.opacity =
            clamp_or(logo.opacity, (0.0, 1.0), defaults.image_watermark.opacity);
        out.image_watermark.position = finite_position(logo.position);

        out.padding.width = self.padding.width.max(MIN_PADDING_DIMENSION);
        out.padding.height = self.padding.height.max(MIN_PADDING_DIMENSION);

        out
    }

    /// True when brightness, contrast and saturation are all exactly 100,
    /// which means the color adjustment stage is skipped.
    pub fn is_color_neutral(&self) -> bool {
        crate::adjustments::ColorAdjustments::from_settings(self).is_neutral()
    }

    /// Output quality as an integer in 1..=100.
    pub fn quality(&self) -> u8 {
        clamp_or(self.output_quality, QUALITY_RANGE, 92.0).round() as u8
    }
}

fn clamp_or(value: f32, (min, max): (f32, f32), fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

fn finite_position(position: WatermarkPosition) -> WatermarkPosition {
    let fix = |v: f32| if v.is_finite() { v } else { 0.0 };
    WatermarkPosition::new(fix(position.x), fix(position.y))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: clamped settings are always within every documented range.
        #[test]
        fn prop_clamped_is_in_range(
            rotation in -1000.0f32..1000.0,
            percent in -1000.0f32..1000.0,
            noise in -500.0f32..500.0,
            quality in -500.0f32..500.0,
            size in -500.0f32..500.0,
            opacity in -5.0f32..5.0,
            pad in 0u32..100_000,
        ) {
            let mut s = EditorSettings::new();
            s.rotation = rotation;
            s.brightness = percent;
            s.contrast = percent;
            s.saturation = percent;
            s.noise = noise;
            s.output_quality = quality;
            s.text_watermark.size = size;
            s.text_watermark.opacity = opacity;
            s.image_watermark.size = size;
            s.image_watermark.opacity = opacity;
            s.padding.width = pad;
            s.padding.height = pad;

            let c = s.clamped();
            prop_assert!((-5.0..=5.0).contains(&c.rotation));
            prop_assert!((0.0..=200.0).contains(&c.brightness));
            prop_assert!((0.0..=100.0).contains(&c.noise));
            prop_assert!((1.0..=100.0).contains(&c.output_quality));
            prop_assert!((10.0..=100.0).contains(&c.text_watermark.size));
            prop_assert!((1.0..=50.0).contains(&c.image_watermark.size));
            prop_assert!((0.0..=1.0).contains(&c.image_watermark.opacity));
            prop_assert_eq!(c.padding.width, pad.max(1));
            prop_assert!((1..=100).contains(&c.quality()));
        }

        /// Property: clamping is idempotent.
        #[test]
        fn prop_clamped_idempotent(rotation in -50.0f32..50.0, noise in -50.0f32..500.0) {
            let mut s = EditorSettings::new();
            s.rotation = rotation;
            s.noise = noise;
            let once = s.clamped();
            prop_assert_eq!(once.clamped(), once);
        }
    }
}
