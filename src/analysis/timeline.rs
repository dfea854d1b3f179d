//! Ordered timeline construction.

use super::{TimelineItem, analyze_message};
use crate::classifier::EmotionClassifier;

/// Analyze each message in order, producing one timeline item per input.
///
/// Messages are processed strictly sequentially: classifier invocation
/// dominates the cost and the timeline must match input order exactly. A
/// failure on one message is isolated to its item; the rest of the timeline
/// is unaffected.
pub fn build_timeline(
    classifier: &dyn EmotionClassifier,
    min_confidence: f32,
    messages: &[String],
) -> Vec<TimelineItem> {
    messages
        .iter()
        .map(|msg| analyze_message(classifier, min_confidence, msg))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::analysis::LABEL_ERROR;
    use crate::analysis::test_support::ScriptedClassifier;

    fn messages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| (*t).to_owned()).collect()
    }

    #[test]
    fn one_item_per_message_in_input_order() {
        let classifier = ScriptedClassifier::new()
            .with("a", "joy", 0.9)
            .with("b", "anger", 0.8)
            .with("c", "joy", 0.7);

        let timeline = build_timeline(&classifier, 0.0, &messages(&["a", "b", "c"]));

        assert_eq!(timeline.len(), 3);
        assert_eq!(
            timeline.iter().map(|i| i.text.as_str()).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        // Not reordered by label or score.
        assert_eq!(timeline[1].emotion, "anger");
    }

    #[test]
    fn failure_is_isolated_per_item() {
        let classifier = ScriptedClassifier::new()
            .with("ok before", "joy", 0.9)
            .failing_on("bad")
            .with("ok after", "sadness", 0.8);

        let timeline = build_timeline(
            &classifier,
            0.0,
            &messages(&["ok before", "bad", "ok after"]),
        );

        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline[0].emotion, "joy");
        assert_eq!(timeline[1].emotion, LABEL_ERROR);
        assert_eq!(timeline[2].emotion, "sadness");
    }

    #[test]
    fn empty_input_yields_empty_timeline() {
        let classifier = ScriptedClassifier::new();
        let timeline = build_timeline(&classifier, 0.0, &[]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn same_text_classifies_identically() {
        let classifier = ScriptedClassifier::new().with("echo", "joy", 0.8123);
        let first = build_timeline(&classifier, 0.0, &messages(&["echo"]));
        let second = build_timeline(&classifier, 0.0, &messages(&["echo"]));
        assert_eq!(first, second);
    }
}
