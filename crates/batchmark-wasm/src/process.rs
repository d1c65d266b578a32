//! Pipeline WASM bindings.
//!
//! A [`Processor`] is built once per batch: it clamps the settings and
//! decodes the font and logo a single time, then runs the pipeline on each
//! source image.
//!
//! # Example
//!
//! ```typescript
//! import { Processor } from '@batchmark/wasm';
//!
//! const processor = new Processor(settings, logoBytes, fontBytes);
//! const preview = processor.preview(sourceBytes);
//! const result = processor.process(sourceBytes);
//! const blob = new Blob([result.bytes()], { type: result.mime_type });
//! ```

use crate::settings::settings_from_js;
use crate::types::{JsBitmap, JsProcessedImage};
use batchmark_core::{
    decode_image, process_bitmap, transform, EditorSettings, ProcessError, ProcessedImage,
    RandomNoise, WatermarkAssets,
};
use js_sys::Array;
use wasm_bindgen::prelude::*;

/// Settings plus decoded watermark assets, reused across a batch.
#[wasm_bindgen]
pub struct Processor {
    settings: EditorSettings,
    assets: WatermarkAssets,
}

#[wasm_bindgen]
impl Processor {
    /// Build a processor from a settings object and optional asset bytes.
    ///
    /// A logo or font that fails to decode is dropped with a warning; the
    /// matching watermark is then omitted from every image.
    #[wasm_bindgen(constructor)]
    pub fn new(
        settings: JsValue,
        logo: Option<Vec<u8>>,
        font: Option<Vec<u8>>,
    ) -> Result<Processor, JsValue> {
        let settings = settings_from_js(settings)?;
        Ok(Self::from_settings(
            settings,
            logo.as_deref(),
            font.as_deref(),
        ))
    }

    /// Whether outputs are letterboxed to a fixed size.
    #[wasm_bindgen(getter)]
    pub fn padding_enabled(&self) -> bool {
        self.settings.padding.enabled
    }

    /// Run the pipeline and return the unencoded result for on-screen preview.
    pub fn preview(&self, bytes: &[u8]) -> Result<JsBitmap, JsValue> {
        let source = decode_image(bytes).map_err(|e| to_js_error(ProcessError::UnreadableSource(e)))?;
        let output = transform(
            &source,
            &self.settings,
            &self.assets,
            &mut RandomNoise::thread_local(),
        )
        .map_err(to_js_error)?;
        Ok(JsBitmap::from_bitmap(output))
    }

    /// Run the pipeline and encode in the configured format.
    pub fn process(&self, bytes: &[u8]) -> Result<JsProcessedImage, JsValue> {
        self.process_bytes(bytes)
            .map(JsProcessedImage::from_processed)
            .map_err(to_js_error)
    }

    /// Process an already decoded bitmap, e.g. one drawn from a canvas.
    pub fn process_bitmap(&self, image: &JsBitmap) -> Result<JsProcessedImage, JsValue> {
        let source = image
            .to_bitmap()
            .map_err(|e| to_js_error(ProcessError::InvalidBitmap(e)))?;
        process_bitmap(
            &source,
            &self.settings,
            &self.assets,
            &mut RandomNoise::thread_local(),
        )
        .map(JsProcessedImage::from_processed)
        .map_err(to_js_error)
    }

    /// Process every `Uint8Array` in `sources`.
    ///
    /// The returned array has one entry per source, in order: a
    /// `JsProcessedImage`, or `null` where that image failed.
    pub fn process_batch(&self, sources: Array) -> Array {
        let sources: Vec<Vec<u8>> = sources
            .iter()
            .map(|value| js_sys::Uint8Array::new(&value).to_vec())
            .collect();
        self.process_each(&sources)
            .into_iter()
            .map(|result| match result {
                Some(image) => JsValue::from(JsProcessedImage::from_processed(image)),
                None => JsValue::NULL,
            })
            .collect()
    }
}

impl Processor {
    /// Native constructor shared by the JS one and the tests.
    pub fn from_settings(
        settings: EditorSettings,
        logo: Option<&[u8]>,
        font: Option<&[u8]>,
    ) -> Self {
        let settings = settings.clamped();
        let assets = WatermarkAssets::load(
            font.filter(|_| settings.is_text_watermark_enabled),
            logo.filter(|_| settings.is_image_watermark_enabled),
        );
        Self { settings, assets }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// One entry per source, in order; `None` where that image failed.
    pub(crate) fn process_each(&self, sources: &[Vec<u8>]) -> Vec<Option<ProcessedImage>> {
        sources
            .iter()
            .enumerate()
            .map(|(index, bytes)| match self.process_bytes(bytes) {
                Ok(image) => Some(image),
                Err(e) => {
                    warn_failure(index, &e);
                    None
                }
            })
            .collect()
    }

    pub(crate) fn process_bytes(
        &self,
        bytes: &[u8],
    ) -> Result<ProcessedImage, ProcessError> {
        batchmark_core::process_image(
            bytes,
            &self.settings,
            &self.assets,
            &mut RandomNoise::thread_local(),
        )
    }
}

/// One-shot processing without a reusable [`Processor`].
#[wasm_bindgen]
pub fn process_image(
    bytes: &[u8],
    settings: JsValue,
    logo: Option<Vec<u8>>,
    font: Option<Vec<u8>>,
) -> Result<JsProcessedImage, JsValue> {
    Processor::new(settings, logo, font)?.process(bytes)
}

fn to_js_error(e: ProcessError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn warn_failure(index: usize, error: &ProcessError) {
    tracing::warn!(index, error = %error, "image failed, continuing batch");
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(&format!(
        "batchmark: image {} failed: {}",
        index, error
    )));
}
