//! ONNX inference backend for emotion classification.
//!
//! Single-model sequence classification: tokenize → ONNX inference →
//! softmax → top label. The label set is read from the checkpoint's
//! `config.json` so the classifier stays agnostic of the concrete model.

use super::download::download_classifier_assets;
use super::{Classification, ClassifierPaths, EmotionClassifier};
use crate::config::ModelConfig;
use crate::error::{EngineError, Result};
use ort::session::Session;
use ort::value::Tensor;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::info;

/// ONNX-backed emotion classifier.
///
/// Wraps a single ONNX session, the tokenizer, and the ordered label set.
/// The session sits behind a mutex: `ort` inference needs exclusive access,
/// and concurrent requests serialize at the model the same way they would at
/// a shared accelerator.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    tokenizer: tokenizers::Tokenizer,
    /// Labels ordered by model output index.
    labels: Vec<String>,
    model_id: String,
}

impl OnnxClassifier {
    /// Load the classifier from pre-downloaded paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the model, tokenizer, or label map fails to load.
    pub fn from_paths(paths: ClassifierPaths, config: &ModelConfig) -> Result<Self> {
        info!("loading emotion classifier ONNX model");
        let builder = Session::builder()
            .and_then(|b| Ok(b.with_intra_threads(config.intra_threads)?))
            .map_err(|e| EngineError::Model(format!("failed to configure ONNX session: {e}")))?;
        let mut builder = register_execution_providers(builder)?;

        let session = builder
            .commit_from_file(&paths.model_onnx)
            .map_err(|e| EngineError::Model(format!("failed to load ONNX model: {e}")))?;

        info!("loading tokenizer (truncation at {} tokens)", config.max_tokens);
        let tokenizer = load_tokenizer(&paths.tokenizer_json, config.max_tokens)?;

        let labels = load_labels(&paths.config_json)?;
        info!(
            "emotion classifier ready (model={}, labels={}, device={})",
            config.model_id,
            labels.len(),
            device_name(),
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            labels,
            model_id: config.model_id.clone(),
        })
    }

    /// Load the classifier, downloading model files on first use.
    ///
    /// Downloads are cached by HuggingFace Hub. For pre-downloaded files use
    /// [`Self::from_paths`].
    ///
    /// # Errors
    ///
    /// Returns an error if download or loading fails.
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let paths = download_classifier_assets(&config.model_id, &config.variant)?;
        Self::from_paths(paths, config)
    }

    /// Run a single ONNX inference call and return the softmaxed probabilities.
    fn run_inference(&self, ids: &[i64], mask: &[i64]) -> Result<Vec<f32>> {
        use ort::session::{SessionInputValue, SessionInputs};

        let seq_len = ids.len();

        // input_ids / attention_mask: shape [1, seq_len]
        let input_ids = Tensor::from_array(([1_usize, seq_len], ids.to_vec()))
            .map_err(|e| EngineError::Classifier(format!("failed to create input_ids tensor: {e}")))?;
        let attention_mask = Tensor::from_array(([1_usize, seq_len], mask.to_vec())).map_err(|e| {
            EngineError::Classifier(format!("failed to create attention_mask tensor: {e}"))
        })?;

        let mut feed: HashMap<String, SessionInputValue> = HashMap::new();
        feed.insert("input_ids".to_string(), input_ids.into());
        feed.insert("attention_mask".to_string(), attention_mask.into());

        let mut session = self
            .session
            .lock()
            .map_err(|_| EngineError::Classifier("ONNX session lock poisoned".to_string()))?;

        let outputs = session
            .run(SessionInputs::from(feed))
            .map_err(|e| EngineError::Classifier(format!("ONNX inference failed: {e}")))?;

        // Output: logits with shape [1, num_labels]
        let output_value = &outputs[0_usize];
        let (_shape, logits) = output_value
            .try_extract_tensor::<f32>()
            .map_err(|e| EngineError::Classifier(format!("failed to extract logits: {e}")))?;

        if logits.len() != self.labels.len() {
            return Err(EngineError::Classifier(format!(
                "model produced {} logits for {} labels",
                logits.len(),
                self.labels.len(),
            )));
        }

        Ok(softmax(logits))
    }
}

impl EmotionClassifier for OnnxClassifier {
    fn classify(&self, text: &str) -> Result<Classification> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| EngineError::Classifier(format!("tokenization failed: {e}")))?;

        let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
        let mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| i64::from(m))
            .collect();

        if ids.is_empty() {
            return Err(EngineError::Classifier(
                "tokenizer produced no tokens".to_string(),
            ));
        }

        let probs = self.run_inference(&ids, &mask)?;
        let (top_id, top_prob) = argmax(&probs);

        let label = self.labels.get(top_id).ok_or_else(|| {
            EngineError::Classifier(format!("label index {top_id} out of range"))
        })?;

        Ok(Classification {
            label: label.clone(),
            confidence: top_prob,
        })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn num_labels(&self) -> usize {
        self.labels.len()
    }

    fn device(&self) -> &str {
        device_name()
    }
}

/// Register accelerator execution providers selected at compile time.
#[cfg(feature = "cuda")]
fn register_execution_providers(
    builder: ort::session::builder::SessionBuilder,
) -> Result<ort::session::builder::SessionBuilder> {
    use ort::execution_providers::CUDAExecutionProvider;
    builder
        .with_execution_providers([CUDAExecutionProvider::default().build()])
        .map_err(|e| EngineError::Model(format!("failed to register CUDA EP: {e}")))
}

#[cfg(all(feature = "directml", not(feature = "cuda")))]
fn register_execution_providers(
    builder: ort::session::builder::SessionBuilder,
) -> Result<ort::session::builder::SessionBuilder> {
    use ort::execution_providers::DirectMLExecutionProvider;
    builder
        .with_execution_providers([DirectMLExecutionProvider::default().build()])
        .map_err(|e| EngineError::Model(format!("failed to register DirectML EP: {e}")))
}

#[cfg(not(any(feature = "cuda", feature = "directml")))]
fn register_execution_providers(
    builder: ort::session::builder::SessionBuilder,
) -> Result<ort::session::builder::SessionBuilder> {
    Ok(builder)
}

/// Compute device the session runs on, derived from the compiled features.
const fn device_name() -> &'static str {
    if cfg!(feature = "cuda") {
        "cuda"
    } else if cfg!(feature = "directml") {
        "directml"
    } else {
        "cpu"
    }
}

/// Load the tokenizer and force truncation at `max_tokens`.
///
/// Truncation is silent and lossy on very long inputs; the upstream length
/// limit (500 chars) keeps this rare in practice.
fn load_tokenizer(path: &std::path::Path, max_tokens: usize) -> Result<tokenizers::Tokenizer> {
    let mut tokenizer = tokenizers::Tokenizer::from_file(path).map_err(|e| {
        EngineError::Model(format!("failed to load tokenizer {}: {e}", path.display()))
    })?;

    tokenizer
        .with_truncation(Some(tokenizers::TruncationParams {
            max_length: max_tokens,
            ..Default::default()
        }))
        .map_err(|e| EngineError::Model(format!("failed to configure truncation: {e}")))?;

    Ok(tokenizer)
}

/// Read the ordered label set from the checkpoint's `config.json`.
///
/// The `id2label` map keys are stringified output indices; the returned
/// vector is ordered by that index so `labels[argmax]` is the top label.
fn load_labels(path: &std::path::Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        EngineError::Model(format!("failed to read config {}: {e}", path.display()))
    })?;

    let json: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| EngineError::Model(format!("failed to parse model config: {e}")))?;

    let id2label = json
        .get("id2label")
        .and_then(|v| v.as_object())
        .ok_or_else(|| EngineError::Model("model config has no id2label map".to_string()))?;

    let mut labels = vec![None; id2label.len()];
    for (key, value) in id2label {
        let index: usize = key
            .parse()
            .map_err(|_| EngineError::Model(format!("non-numeric label index '{key}'")))?;
        let label = value
            .as_str()
            .ok_or_else(|| EngineError::Model(format!("label for index {index} is not a string")))?;
        let slot = labels
            .get_mut(index)
            .ok_or_else(|| EngineError::Model(format!("label index {index} out of range")))?;
        *slot = Some(label.to_owned());
    }

    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            label.ok_or_else(|| EngineError::Model(format!("missing label for index {i}")))
        })
        .collect()
}

/// Numerically stable softmax over a logit vector.
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index and value of the largest probability. Ties break on the first index.
fn argmax(probs: &[f32]) -> (usize, f32) {
    let mut top_id = 0;
    let mut top_prob = f32::NEG_INFINITY;
    for (i, &p) in probs.iter().enumerate() {
        if p > top_prob {
            top_id = i;
            top_prob = p;
        }
    }
    (top_id, top_prob)
}
