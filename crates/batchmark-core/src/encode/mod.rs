//! Image encoding for export.
//!
//! This module provides functionality for:
//! - Encoding RGBA bitmaps to JPEG, PNG or WebP
//! - Parsing and describing output formats (extension, MIME type)
//!
//! All encoders take tightly packed RGBA8 data and validate the buffer
//! length against the dimensions before touching the codec.

mod format;
mod jpeg;
mod png;
mod webp;

pub use format::OutputFormat;
pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use webp::encode_webp;

use thiserror::Error;

use crate::decode::Bitmap;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Requested output format is not one of jpeg, png, webp
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The codec rejected the data
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a bitmap in the requested format.
///
/// `quality` is 1-100. Only JPEG honours it; PNG and WebP are lossless.
pub fn encode(bitmap: &Bitmap, format: OutputFormat, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let bytes = match format {
        OutputFormat::Jpeg => encode_jpeg(&bitmap.pixels, bitmap.width, bitmap.height, quality)?,
        OutputFormat::Png => encode_png(&bitmap.pixels, bitmap.width, bitmap.height)?,
        OutputFormat::Webp => encode_webp(&bitmap.pixels, bitmap.width, bitmap.height, quality)?,
    };
    tracing::debug!(
        %format,
        width = bitmap.width,
        height = bitmap.height,
        bytes = bytes.len(),
        "encoded bitmap"
    );
    Ok(bytes)
}

fn validate(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
