//! Batchmark WASM - WebAssembly bindings for Batchmark
//!
//! This crate exposes the batchmark-core pipeline to the browser front end.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for bitmaps and export results
//! - `decode` - Image decoding bindings (JPEG, PNG, WebP, GIF, BMP)
//! - `encode` - Image encoding bindings (JPEG, PNG, WebP)
//! - `process` - The watermark pipeline, one image or a whole batch
//! - `settings` - Default settings, clamping, anchors and file naming
//!
//! # Usage
//!
//! ```typescript
//! import init, { Processor, default_settings } from '@batchmark/wasm';
//!
//! await init();
//!
//! const processor = new Processor(default_settings(), logoBytes, fontBytes);
//! const results = processor.process_batch(files);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod process;
mod settings;
mod types;

// Re-export public types
pub use decode::{decode_image, get_orientation};
pub use encode::{encode_image, encode_pixels, mime_type};
pub use process::{process_image, Processor};
pub use settings::{
    anchor_position, default_settings, normalize_settings, output_file_name,
    passthrough_file_name,
};
pub use types::{JsBitmap, JsProcessedImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
