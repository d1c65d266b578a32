//! Settings and naming helpers for the front end.
//!
//! Settings cross the boundary as plain JS objects with camelCase keys, the
//! same shape the editor state already has.

use batchmark_core::{EditorSettings, OutputFormat, WatermarkAnchor};
use wasm_bindgen::prelude::*;

pub(crate) fn settings_from_js(value: JsValue) -> Result<EditorSettings, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn settings_to_js(settings: &EditorSettings) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(settings).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The editor's initial settings.
#[wasm_bindgen]
pub fn default_settings() -> Result<JsValue, JsValue> {
    settings_to_js(&EditorSettings::default())
}

/// Fill in missing fields and clamp every number into its range.
#[wasm_bindgen]
pub fn normalize_settings(value: JsValue) -> Result<JsValue, JsValue> {
    let settings = settings_from_js(value)?;
    settings_to_js(&settings.clamped())
}

/// Absolute `{x, y}` for a preset name such as `top-left` or `center`.
#[wasm_bindgen]
pub fn anchor_position(anchor: &str) -> Result<JsValue, JsValue> {
    let anchor = anchor
        .parse::<WatermarkAnchor>()
        .map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&anchor.position())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Exported file name: `{index}_{stem}.{ext}`, index 1-based and zero padded
/// to the digit count of `total`.
#[wasm_bindgen]
pub fn output_file_name(
    index: usize,
    total: usize,
    original_name: &str,
    format: &str,
) -> Result<String, JsValue> {
    let format = format
        .parse::<OutputFormat>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(batchmark_core::output_file_name(index, total, original_name, format))
}

/// File name for an original exported unprocessed: `{index}_{name}`.
#[wasm_bindgen]
pub fn passthrough_file_name(index: usize, total: usize, original_name: &str) -> String {
    batchmark_core::export::passthrough_file_name(index, total, original_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(4, 20, "img.png", "jpg").ok().unwrap(), "04_img.jpeg");
    }

    #[test]
    fn test_passthrough_file_name() {
        assert_eq!(passthrough_file_name(1, 3, "img.png"), "1_img.png");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_default_settings_round_trip() {
        let js = default_settings().unwrap();
        let settings = settings_from_js(js).unwrap();
        assert_eq!(settings, EditorSettings::default());
    }

    #[wasm_bindgen_test]
    fn test_normalize_clamps() {
        let mut settings = EditorSettings::default();
        settings.rotation = 90.0;
        let js = normalize_settings(settings_to_js(&settings).unwrap()).unwrap();
        assert_eq!(settings_from_js(js).unwrap().rotation, 5.0);
    }

    #[wasm_bindgen_test]
    fn test_anchor_position() {
        assert!(anchor_position("bottom-right").is_ok());
        assert!(anchor_position("nowhere").is_err());
    }

    #[wasm_bindgen_test]
    fn test_output_file_name_bad_format() {
        assert!(output_file_name(1, 1, "a.png", "tiff").is_err());
    }
}
