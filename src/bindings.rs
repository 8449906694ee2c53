//! Browser entry points.

use wasm_bindgen::prelude::*;

use crate::config::RetargetConfig;
use crate::pipeline::Pipeline;

/// Route panics and `log` output to the browser console
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Default Genesis 8 configuration as editable JSON
#[wasm_bindgen]
pub fn default_config_json() -> Result<String, JsValue> {
    RetargetConfig::default()
        .to_json_string()
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize config: {}", e)))
}

fn pipeline(config_json: Option<String>) -> Result<Pipeline, JsValue> {
    let pipeline = match config_json {
        Some(json) => Pipeline::from_json(&json),
        None => Pipeline::new(&RetargetConfig::default()),
    };
    pipeline.map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))
}

/// Retarget a landmark stream and return the track as JSON.
/// Uses the default configuration when `config_json` is omitted.
#[wasm_bindgen]
pub fn retarget_landmarks_json(
    landmarks_json: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let output = pipeline(config_json)?
        .run_json(landmarks_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse landmarks: {}", e)))?;

    output
        .track
        .to_json_string()
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize track: {}", e)))
}

/// Retarget a landmark stream, returning `{ track, summary }` as a JS object
#[wasm_bindgen]
pub fn retarget_landmarks(
    landmarks_json: &str,
    config_json: Option<String>,
) -> Result<JsValue, JsValue> {
    let output = pipeline(config_json)?
        .run_json(landmarks_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse landmarks: {}", e)))?;

    serde_wasm_bindgen::to_value(&output.to_json()).map_err(JsValue::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retarget::RetargetTrack;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_default_config_round_trips() {
        let json = default_config_json().unwrap();
        assert_eq!(
            RetargetConfig::from_json(&json).unwrap(),
            RetargetConfig::default()
        );
    }

    #[wasm_bindgen_test]
    fn test_empty_stream_gives_empty_track() {
        let json = retarget_landmarks_json(r#"{ "frames": [] }"#, None).unwrap();
        let track = RetargetTrack::from_json(&json).unwrap();
        assert!(track.is_empty());
        assert_eq!(track.bones().len(), RetargetConfig::default().target_rig.len());
    }

    #[wasm_bindgen_test]
    fn test_bad_config_is_rejected() {
        let config = r#"{ "frame_rate": 0 }"#.to_string();
        assert!(retarget_landmarks_json(r#"{ "frames": [] }"#, Some(config)).is_err());
    }
}
