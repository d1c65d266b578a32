//! Batchmark Core - batch watermarking and export pipeline
//!
//! This crate provides the image processing behind Batchmark: decoding
//! source bytes, the deterministic single-image transform pipeline
//! (color filters, rotation, grain, text and logo watermarks, padding),
//! and encoding to JPEG, PNG or WebP.
//!
//! The pipeline is a pure function of the source bitmap, the settings and
//! the decoded watermark assets. Noise is the only randomness and comes in
//! through [`NoiseSource`].

pub mod adjustments;
pub mod color;
pub mod composite;
pub mod decode;
pub mod encode;
pub mod export;
pub mod luminance;
pub mod noise;
pub mod pipeline;
pub mod position;
pub mod settings;
pub mod transform;
pub mod watermark;

pub use adjustments::{apply_color_adjustments, ColorAdjustments};
pub use color::Rgba8;
pub use decode::{decode_image, Bitmap, DecodeError, Orientation};
pub use encode::{encode, EncodeError, OutputFormat};
pub use export::{export_entries, output_file_name, ExportEntry, ExportSource};
pub use noise::{FixedNoise, NoiseSource, RandomNoise};
pub use pipeline::{process_batch, process_bitmap, process_image, transform, ProcessError, ProcessedImage};
pub use position::{fit_position, WatermarkAnchor};
pub use settings::{EditorSettings, ImageWatermark, PaddingSettings, TextWatermark, WatermarkPosition};
pub use watermark::{load_font, WatermarkAssets, WatermarkError};
