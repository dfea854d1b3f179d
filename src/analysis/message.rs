//! Per-message emotion analysis.

use super::{LABEL_ERROR, LABEL_NEUTRAL, LABEL_UNCERTAIN, TimelineItem};
use crate::classifier::EmotionClassifier;
use tracing::warn;

/// Analyze a single message, never failing.
///
/// Empty or whitespace-only text short-circuits to `neutral` without
/// invoking the classifier. A confidence strictly below `min_confidence`
/// downgrades the label to `uncertain`; the numeric score is kept so callers
/// can still see how close the classifier was. Classifier failures become
/// the `error` sentinel and are logged, not propagated.
pub fn analyze_message(
    classifier: &dyn EmotionClassifier,
    min_confidence: f32,
    text: &str,
) -> TimelineItem {
    if text.trim().is_empty() {
        return TimelineItem {
            text: text.to_owned(),
            emotion: LABEL_NEUTRAL.to_owned(),
            score: 0.0,
        };
    }

    match classifier.classify(text) {
        Ok(classification) => {
            let score = round4(classification.confidence);
            let emotion = if classification.confidence < min_confidence {
                LABEL_UNCERTAIN.to_owned()
            } else {
                classification.label
            };
            TimelineItem {
                text: text.to_owned(),
                emotion,
                score,
            }
        }
        Err(e) => {
            warn!("error analyzing message: {e}");
            TimelineItem {
                text: text.to_owned(),
                emotion: LABEL_ERROR.to_owned(),
                score: 0.0,
            }
        }
    }
}

/// Round a score to 4 decimal places.
fn round4(score: f32) -> f32 {
    (score * 10_000.0).round() / 10_000.0
}
