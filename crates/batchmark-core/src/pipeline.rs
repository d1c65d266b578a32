//! The single-image transform pipeline and its batch driver.
//!
//! ## Stage Order
//! 1. Canvas allocation (source dimensions)
//! 2. Background fill (opaque white for JPEG, transparent otherwise)
//! 3. Color filters on the source (skipped when neutral)
//! 4. Rotation draw onto the canvas (runs at 0° too)
//! 5. Noise (skipped when 0)
//! 6. Text watermark
//! 7. Image watermark
//! 8. Padding
//!
//! Watermarks are drawn after the filters, so they are never color adjusted.
//! The settings are clamped on entry and never mutated.

use std::borrow::Cow;

use thiserror::Error;

use crate::adjustments::{apply_color_adjustments, ColorAdjustments};
use crate::color::Rgba8;
use crate::composite::over;
use crate::decode::{decode_image, Bitmap, DecodeError};
use crate::encode::{encode, EncodeError, OutputFormat};
use crate::noise::{apply_noise, NoiseSource};
use crate::settings::EditorSettings;
use crate::transform::{apply_padding, rotate_onto};
use crate::watermark::{draw_image_watermark, draw_text_watermark, WatermarkAssets};

/// Errors that end processing of one image.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The source bytes could not be decoded
    #[error("Unreadable source image: {0}")]
    UnreadableSource(#[source] DecodeError),

    /// A caller-built bitmap does not hold width * height * 4 bytes
    #[error("Invalid source bitmap: {0}")]
    InvalidBitmap(#[source] DecodeError),

    /// The result could not be encoded
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// One exported image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
}

impl ProcessedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }
}

/// Run every stage on `source` and return the finished bitmap.
///
/// Settings never cause a failure: out of range values are clamped and a
/// missing watermark asset only omits that watermark. The only error is a
/// malformed `source` buffer.
pub fn transform(
    source: &Bitmap,
    settings: &EditorSettings,
    assets: &WatermarkAssets,
    noise: &mut impl NoiseSource,
) -> Result<Bitmap, ProcessError> {
    source.validate().map_err(ProcessError::InvalidBitmap)?;
    let settings = settings.clamped();
    let format = settings.output_format;
    let (width, height) = (source.width, source.height);

    let background = if format == OutputFormat::Jpeg {
        Rgba8::WHITE
    } else {
        Rgba8::TRANSPARENT
    };
    let mut canvas = Bitmap::filled(width, height, background);
    tracing::debug!(width, height, %format, "allocated canvas");

    let adjustments = ColorAdjustments::from_settings(&settings);
    let drawn: Cow<'_, Bitmap> = if adjustments.is_neutral() {
        tracing::debug!("color filters neutral, skipped");
        Cow::Borrowed(source)
    } else {
        let mut filtered = source.clone();
        apply_color_adjustments(&mut filtered.pixels, &adjustments);
        tracing::debug!(
            brightness = adjustments.brightness,
            contrast = adjustments.contrast,
            saturation = adjustments.saturation,
            "applied color filters"
        );
        Cow::Owned(filtered)
    };

    rotate_onto(&mut canvas, &drawn, settings.rotation as f64);
    tracing::debug!(rotation = settings.rotation, "drew source");

    if settings.noise > 0.0 {
        apply_noise(&mut canvas, settings.noise, noise);
        tracing::debug!(noise = settings.noise, "applied noise");
    }

    if settings.is_text_watermark_enabled {
        match &assets.font {
            Some(font) => draw_text_watermark(&mut canvas, font, &settings.text_watermark),
            None => tracing::warn!("text watermark enabled but no font available, omitted"),
        }
    }

    if settings.is_image_watermark_enabled {
        match &assets.logo {
            Some(logo) => draw_image_watermark(&mut canvas, logo, &settings.image_watermark),
            None => tracing::warn!("image watermark enabled but no image available, omitted"),
        }
    }

    if settings.padding.enabled {
        let mut fill = Rgba8::parse_or(&settings.padding.color, Rgba8::WHITE, "padding.color");
        if format == OutputFormat::Jpeg {
            fill = Rgba8::from_array(over(Rgba8::WHITE.to_array(), fill.to_array(), 1.0));
        }
        canvas = apply_padding(&canvas, settings.padding.width, settings.padding.height, fill);
    }

    Ok(canvas)
}

/// Transform a decoded bitmap and encode it in the configured format.
pub fn process_bitmap(
    source: &Bitmap,
    settings: &EditorSettings,
    assets: &WatermarkAssets,
    noise: &mut impl NoiseSource,
) -> Result<ProcessedImage, ProcessError> {
    let output = transform(source, settings, assets, noise)?;
    let format = settings.output_format;
    let bytes = encode(&output, format, settings.quality())?;

    Ok(ProcessedImage {
        bytes,
        format,
        width: output.width,
        height: output.height,
    })
}

/// Decode, transform and encode one image.
#[tracing::instrument(skip_all, fields(bytes = source_bytes.len(), format = %settings.output_format))]
pub fn process_image(
    source_bytes: &[u8],
    settings: &EditorSettings,
    assets: &WatermarkAssets,
    noise: &mut impl NoiseSource,
) -> Result<ProcessedImage, ProcessError> {
    let source = decode_image(source_bytes).map_err(ProcessError::UnreadableSource)?;
    process_bitmap(&source, settings, assets, noise)
}

/// Process every source with the same settings.
///
/// The font and logo bytes are decoded once for the whole batch. Results
/// come back in input order, and one image failing never stops the others.
pub fn process_batch<I, S>(
    sources: I,
    settings: &EditorSettings,
    logo_bytes: Option<&[u8]>,
    font_bytes: Option<&[u8]>,
    noise: &mut impl NoiseSource,
) -> Vec<Result<ProcessedImage, ProcessError>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let assets = WatermarkAssets::load(
        font_bytes.filter(|_| settings.is_text_watermark_enabled),
        logo_bytes.filter(|_| settings.is_image_watermark_enabled),
    );

    sources
        .into_iter()
        .enumerate()
        .map(|(index, bytes)| {
            let result = process_image(bytes.as_ref(), settings, &assets, noise);
            if let Err(e) = &result {
                tracing::warn!(index, error = %e, "image failed, continuing batch");
            }
            result
        })
        .collect()
}
