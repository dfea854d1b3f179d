//! Emotion classification backends.
//!
//! The trained classifier is an opaque capability: given text, return the top
//! label from a fixed set together with its probability. The analysis
//! pipeline only sees the [`EmotionClassifier`] trait, so any checkpoint with
//! a stable label set and probability semantics can be swapped in.

mod download;
mod onnx;

pub use download::{ClassifierPaths, download_classifier_assets, model_filename};
pub use onnx::OnnxClassifier;

use crate::error::Result;

/// Top label and probability for one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// One label from the model's fixed label set.
    pub label: String,
    /// Probability of the top label in the range `0.0..=1.0`.
    pub confidence: f32,
}

/// Opaque emotion classification capability.
///
/// Implementations are loaded once at startup and shared immutably across
/// request handlers. Calls are stateless; the same text against the same
/// model yields the same result.
pub trait EmotionClassifier: Send + Sync {
    /// Classify a single non-empty text.
    ///
    /// # Errors
    ///
    /// Returns an error if tokenization or inference fails. Callers in the
    /// analysis pipeline convert failures to the `error` sentinel rather
    /// than propagating them.
    fn classify(&self, text: &str) -> Result<Classification>;

    /// Identifier of the loaded checkpoint.
    fn model_id(&self) -> &str;

    /// Number of labels in the model's closed label set.
    fn num_labels(&self) -> usize;

    /// Compute device the model runs on (diagnostic).
    fn device(&self) -> &str;
}
