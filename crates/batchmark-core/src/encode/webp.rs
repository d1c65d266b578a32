//! WebP encoding for export.
//!
//! The `image` crate ships a pure-Rust WebP encoder that only writes the
//! lossless (VP8L) bitstream. The quality value is accepted so callers can
//! pass it through unchanged, and is recorded in the debug log, but it does
//! not change the output.

use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate, EncodeError};

/// Encode RGBA pixel data to WebP bytes.
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;
    tracing::debug!(quality, "webp encoder is lossless, quality passed through");

    let mut buffer = Cursor::new(Vec::new());
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
