//! Bitmap resizing for the padding stage and logo watermarks.
//!
//! Wraps the `image` crate's resampling. Functions return new bitmaps
//! without modifying the input.

use crate::decode::{Bitmap, DecodeError};

/// Filter type for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    /// Nearest neighbor (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (good balance of speed and quality).
    #[default]
    Bilinear,
    /// Lanczos3 (highest quality, slowest).
    Lanczos3,
}

impl FilterType {
    /// Convert to image crate's filter type.
    pub(crate) fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resize a bitmap to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` for a zero target size and
/// `DecodeError::CorruptedFile` when the pixel buffer does not match the
/// bitmap's dimensions.
pub fn resize(
    bitmap: &Bitmap,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Bitmap, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if bitmap.width == width && bitmap.height == height {
        return Ok(bitmap.clone());
    }

    let rgba = bitmap
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(Bitmap::from_rgba_image(resized))
}

/// Dimensions of `(width, height)` scaled by `scale`, rounded, never below 1.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let scale_edge = |edge: u32| ((edge as f64 * scale).round() as u32).max(1);
    (scale_edge(width), scale_edge(height))
}
