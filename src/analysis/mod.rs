//! Conversation emotion analysis pipeline.
//!
//! Request flow: per-message classification (with confidence gating and
//! per-item error isolation) → ordered timeline → distribution tally +
//! summary + trend text.

mod distribution;
mod message;
mod summary;
mod timeline;
mod trend;

pub use distribution::{emotion_distribution, ranked_valid_counts};
pub use message::analyze_message;
pub use summary::generate_summary;
pub use timeline::build_timeline;
pub use trend::generate_trend;

use crate::classifier::EmotionClassifier;
use crate::config::AnalysisConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label for empty or whitespace-only input (classifier never invoked).
pub const LABEL_NEUTRAL: &str = "neutral";

/// Label for classifications below the configured confidence floor.
pub const LABEL_UNCERTAIN: &str = "uncertain";

/// Label for messages whose classification failed internally.
pub const LABEL_ERROR: &str = "error";

/// One analyzed message: original text, assigned label, confidence.
///
/// `emotion` is either a model label or one of the pipeline sentinels
/// ([`LABEL_NEUTRAL`], [`LABEL_UNCERTAIN`], [`LABEL_ERROR`]). `score` is in
/// `0.0..=1.0`, rounded to 4 decimal places; sentinel items other than
/// `uncertain` carry 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Original input text, unmodified.
    pub text: String,
    /// Assigned emotion label.
    pub emotion: String,
    /// Classifier confidence, rounded to 4 decimal places.
    pub score: f32,
}

impl TimelineItem {
    /// Whether this item counts toward the summary statistics.
    ///
    /// `error` and `uncertain` items stay in the timeline and the raw
    /// distribution but are excluded from percentages and intensity.
    pub fn is_valid(&self) -> bool {
        self.emotion != LABEL_ERROR && self.emotion != LABEL_UNCERTAIN
    }
}

/// Aggregated result of analyzing one conversation.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Per-message results in input order.
    pub timeline: Vec<TimelineItem>,
    /// Natural-language summary of the dominant emotions and intensity.
    pub summary: String,
    /// Natural-language description of the start → middle → end arc.
    pub emotional_trend: String,
    /// Occurrence count per distinct label, sentinels included.
    pub emotion_distribution: HashMap<String, usize>,
}

/// Run the full analysis pipeline over a conversation.
///
/// Messages are processed strictly sequentially and in order; a failure
/// classifying one message is recorded as an `error` item and does not
/// affect the rest.
///
/// # Errors
///
/// Per-message failures never surface here. An error is only returned for
/// pipeline-level faults outside per-item isolation.
pub fn analyze_conversation(
    classifier: &dyn EmotionClassifier,
    config: &AnalysisConfig,
    messages: &[String],
) -> Result<AnalysisReport> {
    let timeline = build_timeline(classifier, config.min_confidence, messages);
    let summary = generate_summary(&timeline);
    let emotional_trend = generate_trend(&timeline);
    let emotion_distribution = emotion_distribution(&timeline);

    Ok(AnalysisReport {
        timeline,
        summary,
        emotional_trend,
        emotion_distribution,
    })
}
