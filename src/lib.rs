//! Empathy Engine: emotion analysis for chat conversations.
//!
//! A single inference-backed pipeline: each message is classified by a
//! locally-loaded ONNX emotion model, the per-message results form an
//! ordered timeline, and the timeline is aggregated into a label
//! distribution, a natural-language summary, and a trend sentence.
//!
//! # Architecture
//!
//! - **Classifier**: opaque `text → (label, confidence)` capability behind
//!   the [`classifier::EmotionClassifier`] trait, implemented by an ONNX
//!   session loaded once at startup and shared across requests
//! - **Analysis**: per-message gating, timeline, distribution, summary,
//!   trend — pure functions over the classifier's output
//! - **Server**: axum HTTP surface with validation at the boundary

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod error;
pub mod server;

pub use analysis::{AnalysisReport, TimelineItem, analyze_conversation};
pub use classifier::{Classification, EmotionClassifier, OnnxClassifier};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use server::AnalysisServer;
