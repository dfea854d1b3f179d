//! Label frequency aggregation over a timeline.

use super::TimelineItem;
use std::collections::HashMap;

/// Count occurrences of every distinct label, sentinels included.
///
/// This is the raw view returned in the response payload; the values always
/// sum to the timeline length.
pub fn emotion_distribution(timeline: &[TimelineItem]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for item in timeline {
        *counts.entry(item.emotion.clone()).or_insert(0) += 1;
    }
    counts
}

/// Tally of valid items (excluding `error`/`uncertain`), ranked by
/// descending count.
///
/// Ties keep first-encounter order: labels are tallied in timeline order and
/// the sort is stable. This is the internal view the summary is built from.
pub fn ranked_valid_counts(timeline: &[TimelineItem]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in timeline.iter().filter(|i| i.is_valid()) {
        match counts.iter_mut().find(|(label, _)| *label == item.emotion) {
            Some((_, count)) => *count += 1,
            None => counts.push((item.emotion.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::analysis::{LABEL_ERROR, LABEL_UNCERTAIN};

    fn item(emotion: &str, score: f32) -> TimelineItem {
        TimelineItem {
            text: "msg".to_owned(),
            emotion: emotion.to_owned(),
            score,
        }
    }

    #[test]
    fn distribution_counts_sum_to_timeline_length() {
        let timeline = vec![
            item("joy", 0.9),
            item("joy", 0.8),
            item(LABEL_ERROR, 0.0),
            item("sadness", 0.7),
        ];
        let dist = emotion_distribution(&timeline);
        assert_eq!(dist.values().sum::<usize>(), timeline.len());
        assert_eq!(dist["joy"], 2);
        assert_eq!(dist[LABEL_ERROR], 1);
        assert_eq!(dist["sadness"], 1);
    }

    #[test]
    fn distribution_includes_sentinels() {
        let timeline = vec![item(LABEL_ERROR, 0.0), item(LABEL_UNCERTAIN, 0.3)];
        let dist = emotion_distribution(&timeline);
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[LABEL_ERROR], 1);
        assert_eq!(dist[LABEL_UNCERTAIN], 1);
    }

    #[test]
    fn distribution_of_empty_timeline_is_empty() {
        assert!(emotion_distribution(&[]).is_empty());
    }

    #[test]
    fn ranked_counts_exclude_error_and_uncertain() {
        let timeline = vec![
            item("joy", 0.9),
            item(LABEL_ERROR, 0.0),
            item(LABEL_UNCERTAIN, 0.4),
            item("joy", 0.8),
        ];
        let ranked = ranked_valid_counts(&timeline);
        assert_eq!(ranked, vec![("joy".to_owned(), 2)]);
    }

    #[test]
    fn ranked_counts_order_by_descending_count() {
        let timeline = vec![
            item("sadness", 0.7),
            item("joy", 0.9),
            item("joy", 0.8),
            item("joy", 0.7),
            item("sadness", 0.6),
        ];
        let ranked = ranked_valid_counts(&timeline);
        assert_eq!(ranked[0], ("joy".to_owned(), 3));
        assert_eq!(ranked[1], ("sadness".to_owned(), 2));
    }

    #[test]
    fn ranked_counts_break_ties_by_first_encounter() {
        let timeline = vec![
            item("surprise", 0.9),
            item("anger", 0.9),
            item("surprise", 0.8),
            item("anger", 0.8),
        ];
        let ranked = ranked_valid_counts(&timeline);
        assert_eq!(ranked[0].0, "surprise");
        assert_eq!(ranked[1].0, "anger");
    }
}
