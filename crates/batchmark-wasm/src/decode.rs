//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode any supported raster format to RGBA, upright
//! - [`get_orientation`] - Read the EXIF orientation tag (1-8)
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@batchmark/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const data = new ImageData(new Uint8ClampedArray(image.pixels()), image.width, image.height);
//! ```

use crate::types::JsBitmap;
use batchmark_core::decode;
use wasm_bindgen::prelude::*;

/// Decode image bytes (JPEG, PNG, WebP, GIF, BMP) into an RGBA bitmap.
///
/// EXIF orientation is applied so the result is upright.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the data is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::decode_image(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation value (1-8) of the image, 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_invalid_bytes() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_empty() {
        assert!(decode_image(&[]).is_err());
    }
}
