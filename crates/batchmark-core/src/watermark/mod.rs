//! Text and logo watermarks.
//!
//! Both are drawn after the color filters, so they are never color
//! adjusted. Their assets (the font and the logo bitmap) are decoded once by
//! the caller and handed to the pipeline in [`WatermarkAssets`]; a missing
//! asset omits that watermark instead of failing the image.

mod logo;
mod text;

pub use logo::{draw_image_watermark, logo_dimensions};
pub use text::{draw_text_watermark, font_size_px, load_font, measure_text};

use std::fmt;

use ab_glyph::FontArc;
use thiserror::Error;

use crate::decode::{decode_image, Bitmap, DecodeError};

/// Errors that can occur while preparing watermark assets.
#[derive(Debug, Error)]
pub enum WatermarkError {
    /// The font bytes are not a usable TrueType/OpenType font
    #[error("Invalid font: {0}")]
    InvalidFont(String),

    /// The logo bytes could not be decoded
    #[error("Unreadable watermark image: {0}")]
    UnreadableImage(#[from] DecodeError),
}

/// Decoded inputs for the watermark stages.
#[derive(Clone, Default)]
pub struct WatermarkAssets {
    /// Font for the text watermark.
    pub font: Option<FontArc>,
    /// Logo for the image watermark.
    pub logo: Option<Bitmap>,
}

impl WatermarkAssets {
    pub fn new(font: Option<FontArc>, logo: Option<Bitmap>) -> Self {
        Self { font, logo }
    }

    /// Decode optional font and logo bytes.
    ///
    /// Either asset failing to load is logged and left out; the other one is
    /// still used.
    pub fn load(font_bytes: Option<&[u8]>, logo_bytes: Option<&[u8]>) -> Self {
        let font = font_bytes.and_then(|bytes| match load_font(bytes.to_vec()) {
            Ok(font) => Some(font),
            Err(e) => {
                tracing::warn!(error = %e, "text watermark font unusable, text watermark omitted");
                None
            }
        });
        let logo = logo_bytes.and_then(|bytes| match load_logo(bytes) {
            Ok(logo) => Some(logo),
            Err(e) => {
                tracing::warn!(error = %e, "image watermark omitted");
                None
            }
        });
        Self { font, logo }
    }
}

impl fmt::Debug for WatermarkAssets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatermarkAssets")
            .field("font", &self.font.is_some())
            .field("logo", &self.logo.as_ref().map(|l| (l.width, l.height)))
            .finish()
    }
}

/// Decode logo bytes into a bitmap.
pub fn load_logo(bytes: &[u8]) -> Result<Bitmap, WatermarkError> {
    Ok(decode_image(bytes)?)
}

/// The bundled test font: printable ASCII of DejaVu Sans.
#[cfg(test)]
pub(crate) fn fixture_font() -> FontArc {
    load_font(include_bytes!("../../testdata/fixture-sans.ttf").to_vec()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_skips_bad_assets() {
        let assets = WatermarkAssets::load(
            Some(b"not a font".as_slice()),
            Some(b"not an image".as_slice()),
        );
        assert!(assets.font.is_none());
        assert!(assets.logo.is_none());
    }

    #[test]
    fn test_load_bundled_font() {
        let bytes = include_bytes!("../../testdata/fixture-sans.ttf");
        let assets = WatermarkAssets::load(Some(bytes.as_slice()), None);
        assert!(assets.font.is_some());
        assert!(assets.logo.is_none());
    }

    #[test]
    fn test_load_nothing() {
        let assets = WatermarkAssets::load(None, None);
        assert!(assets.font.is_none());
        assert!(assets.logo.is_none());
    }

    #[test]
    fn test_load_logo_error_kind() {
        let err = load_logo(&[]).unwrap_err();
        assert!(matches!(err, WatermarkError::UnreadableImage(DecodeError::InvalidFormat)));
    }
}
