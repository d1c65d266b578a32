//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_image`] - Encode a JsBitmap as `jpeg`, `png` or `webp`
//! - [`encode_pixels`] - Encode raw RGBA pixel data
//!
//! # Example
//!
//! ```typescript
//! import { encode_image } from '@batchmark/wasm';
//!
//! const jpeg = encode_image(bitmap, 'jpeg', 92);
//! const blob = new Blob([jpeg], { type: 'image/jpeg' });
//! ```

use crate::types::JsBitmap;
use batchmark_core::encode::{self, OutputFormat};
use batchmark_core::Bitmap;
use wasm_bindgen::prelude::*;

fn parse_format(format: &str) -> Result<OutputFormat, JsValue> {
    format
        .parse::<OutputFormat>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode RGBA pixel data.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data as a `Uint8Array` (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `format` - `jpeg`/`jpg`, `png` or `webp` (MIME types are accepted too)
/// * `quality` - 1-100, used by JPEG only
///
/// # Errors
///
/// Returns an error if:
/// - The format is not supported
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
#[wasm_bindgen]
pub fn encode_pixels(
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    format: &str,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    let format = parse_format(format)?;
    let bitmap = Bitmap {
        width,
        height,
        pixels,
    };
    encode::encode(&bitmap, format, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsBitmap. Convenience wrapper over [`encode_pixels`].
#[wasm_bindgen]
pub fn encode_image(image: &JsBitmap, format: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
    let format = parse_format(format)?;
    let bitmap = image
        .to_bitmap()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    encode::encode(&bitmap, format, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// MIME type for a format name, e.g. `image/webp` for `webp`.
#[wasm_bindgen]
pub fn mime_type(format: &str) -> Result<String, JsValue> {
    Ok(parse_format(format)?.mime_type().to_string())
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_unsupported_format() {
        let img = JsBitmap::new(2, 2, vec![0u8; 16]).unwrap();
        assert!(encode_image(&img, "tiff", 90).is_err());
        assert!(mime_type("gif").is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_invalid_pixel_data() {
        assert!(encode_pixels(vec![0u8; 10], 2, 2, "png", 90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_invalid_dimensions() {
        assert!(encode_pixels(Vec::new(), 0, 2, "jpeg", 90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_webp() {
        let img = JsBitmap::new(8, 8, vec![200u8; 8 * 8 * 4]).unwrap();
        let webp = encode_image(&img, "webp", 80).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
    }
}
