//! Image decoding for Batchmark.
//!
//! This module provides functionality for:
//! - Decoding source and watermark images from their encoded bytes
//! - Applying EXIF orientation so bitmaps come out upright
//!
//! # Architecture
//!
//! Decoding is the only blocking step at the pipeline boundary: callers turn
//! bytes into a [`Bitmap`] once, then every transform stage works on pixels.
//!
//! # Examples
//!
//! ```ignore
//! use batchmark_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod loader;
mod types;

pub use loader::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{Bitmap, DecodeError, Orientation};
