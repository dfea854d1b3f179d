//! End-to-end properties of the analysis pipeline against a fake classifier.
//!
//! The ONNX classifier needs a downloaded model, so these tests drive the
//! pipeline through the public [`EmotionClassifier`] trait with a keyword
//! lookup standing in for the model.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use empathy_engine::analysis::{self, analyze_conversation};
use empathy_engine::classifier::{Classification, EmotionClassifier};
use empathy_engine::config::AnalysisConfig;
use empathy_engine::error::{EngineError, Result};

/// Deterministic stand-in for the ONNX model: the first known keyword in the
/// text decides the label. Texts containing "FAIL" error out.
struct KeywordClassifier;

impl EmotionClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Result<Classification> {
        if text.contains("FAIL") {
            return Err(EngineError::Classifier("simulated failure".to_string()));
        }
        let (label, confidence) = if text.contains("love") || text.contains("great") {
            ("joy", 0.92)
        } else if text.contains("sad") || text.contains("miss") {
            ("sadness", 0.87)
        } else if text.contains("angry") {
            ("anger", 0.9)
        } else {
            ("neutral", 0.55)
        };
        Ok(Classification {
            label: label.to_owned(),
            confidence,
        })
    }

    fn model_id(&self) -> &str {
        "keyword-fake"
    }

    fn num_labels(&self) -> usize {
        4
    }

    fn device(&self) -> &str {
        "cpu"
    }
}

fn messages(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| (*t).to_owned()).collect()
}

fn analyze(texts: &[&str]) -> empathy_engine::AnalysisReport {
    analyze_conversation(
        &KeywordClassifier,
        &AnalysisConfig::default(),
        &messages(texts),
    )
    .unwrap()
}

#[test]
fn timeline_matches_message_count_and_order() {
    let report = analyze(&["I love this", "I am sad", "I am angry"]);
    assert_eq!(report.timeline.len(), 3);
    assert_eq!(report.timeline[0].text, "I love this");
    assert_eq!(report.timeline[0].emotion, "joy");
    assert_eq!(report.timeline[1].emotion, "sadness");
    assert_eq!(report.timeline[2].emotion, "anger");
}

#[test]
fn distribution_always_sums_to_timeline_length() {
    let report = analyze(&["love", "love", "sad", "FAIL here", "   "]);
    assert_eq!(
        report.emotion_distribution.values().sum::<usize>(),
        report.timeline.len()
    );
    assert_eq!(report.emotion_distribution["joy"], 2);
    assert_eq!(report.emotion_distribution["error"], 1);
    assert_eq!(report.emotion_distribution["neutral"], 1);
}

#[test]
fn whitespace_message_is_neutral_without_classification() {
    // Boundary validation would normally reject this; the analyzer still
    // handles it when called as a library.
    let report = analyze(&["   "]);
    assert_eq!(report.timeline[0].emotion, analysis::LABEL_NEUTRAL);
    assert_eq!(report.timeline[0].score, 0.0);
}

#[test]
fn classification_failure_is_isolated_to_its_item() {
    let report = analyze(&["love this", "FAIL now", "miss you"]);
    assert_eq!(report.timeline[0].emotion, "joy");
    assert_eq!(report.timeline[1].emotion, analysis::LABEL_ERROR);
    assert_eq!(report.timeline[1].score, 0.0);
    assert_eq!(report.timeline[2].emotion, "sadness");
}

#[test]
fn dominant_emotion_percentage_uses_valid_count() {
    let report = analyze(&["love", "great stuff", "so sad"]);
    assert!(
        report
            .summary
            .contains("**joy** (~66.7% of the confidently detected messages)")
    );
    assert!(report.summary.contains("sadness (~33.3%)"));
}

#[test]
fn all_error_timeline_gets_weak_signal_summary() {
    let report = analyze(&["FAIL a", "FAIL b"]);
    assert!(report.summary.starts_with("The model could not confidently"));
}

#[test]
fn trend_reads_start_middle_end_with_floor_midpoint() {
    let report = analyze(&["love", "love", "so sad", "so sad"]);
    // len 4 → middle index 2 (just past the true midpoint).
    assert!(report.emotional_trend.contains("begins with joy"));
    assert!(
        report
            .emotional_trend
            .contains("shifts to sadness in the middle")
    );
    assert!(report.emotional_trend.contains("ends with sadness"));
    assert!(
        report
            .emotional_trend
            .contains("This indicates an emotional shift from joy to sadness.")
    );
}

#[test]
fn single_message_has_no_trend() {
    let report = analyze(&["love"]);
    assert_eq!(
        report.emotional_trend,
        "Not enough messages to determine an emotional trend."
    );
}

#[test]
fn repeated_analysis_is_deterministic() {
    let first = analyze(&["love", "so sad"]);
    let second = analyze(&["love", "so sad"]);
    assert_eq!(first.timeline, second.timeline);
    assert_eq!(first.summary, second.summary);
    assert_eq!(first.emotional_trend, second.emotional_trend);
}

#[test]
fn confidence_floor_downgrades_to_uncertain() {
    let config = AnalysisConfig {
        min_confidence: 0.6,
        ..AnalysisConfig::default()
    };
    // "hmm" classifies as neutral at 0.55, below the 0.6 floor.
    let report = analyze_conversation(&KeywordClassifier, &config, &messages(&["hmm", "love"]))
        .unwrap();
    assert_eq!(report.timeline[0].emotion, analysis::LABEL_UNCERTAIN);
    // The numeric score survives the downgrade.
    assert_eq!(report.timeline[0].score, 0.55);
    assert_eq!(report.timeline[1].emotion, "joy");
}

#[test]
fn uncertain_items_are_counted_but_not_summarized() {
    let config = AnalysisConfig {
        min_confidence: 0.6,
        ..AnalysisConfig::default()
    };
    let report = analyze_conversation(
        &KeywordClassifier,
        &config,
        &messages(&["hmm", "love", "love"]),
    )
    .unwrap();

    assert_eq!(report.emotion_distribution["uncertain"], 1);
    assert_eq!(report.emotion_distribution.values().sum::<usize>(), 3);
    // joy is 100% of the *valid* items.
    assert!(report.summary.contains("**joy** (~100.0%"));
}
