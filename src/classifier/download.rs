//! Classifier asset download from HuggingFace Hub.

use crate::error::{EngineError, Result};
use std::path::PathBuf;
use tracing::info;

/// Paths to downloaded classifier assets.
pub struct ClassifierPaths {
    /// Path to the ONNX model file (inside the repo's `onnx/` subfolder).
    pub model_onnx: PathBuf,
    /// Path to `tokenizer.json`.
    pub tokenizer_json: PathBuf,
    /// Path to `config.json` (carries the `id2label` map).
    pub config_json: PathBuf,
}

/// Map a user-facing variant name to the ONNX filename inside the `onnx/` subfolder.
pub fn model_filename(variant: &str) -> &'static str {
    match variant {
        "fp32" => "onnx/model.onnx",
        "q8" | "quantized" => "onnx/model_quantized.onnx",
        _ => {
            info!("unknown model variant '{variant}', falling back to q8");
            "onnx/model_quantized.onnx"
        }
    }
}

/// Download (or verify cache of) all classifier assets from HuggingFace Hub.
///
/// Files are cached by the HF Hub layout, so repeat startups hit the disk
/// cache instead of the network.
///
/// # Errors
///
/// Returns an error if any download fails.
pub fn download_classifier_assets(model_id: &str, variant: &str) -> Result<ClassifierPaths> {
    let api = hf_hub::api::sync::Api::new()
        .map_err(|e| EngineError::Model(format!("HF Hub API init failed: {e}")))?;
    let repo = api.model(model_id.to_owned());

    let model_file = model_filename(variant);
    info!("ensuring classifier model: {model_id}/{model_file}");
    let model_onnx = repo
        .get(model_file)
        .map_err(|e| EngineError::Model(format!("failed to download {model_file}: {e}")))?;

    info!("ensuring tokenizer.json");
    let tokenizer_json = repo
        .get("tokenizer.json")
        .map_err(|e| EngineError::Model(format!("failed to download tokenizer.json: {e}")))?;

    info!("ensuring config.json");
    let config_json = repo
        .get("config.json")
        .map_err(|e| EngineError::Model(format!("failed to download config.json: {e}")))?;

    Ok(ClassifierPaths {
        model_onnx,
        tokenizer_json,
        config_json,
    })
}
