//! Natural-language summary of the dominant emotions.

use super::{TimelineItem, ranked_valid_counts};

/// Fixed response for an empty timeline.
const NO_MESSAGES: &str = "No messages were provided, so no emotional signal could be detected.";

/// Fixed response when every item is `error` or `uncertain`.
const WEAK_SIGNAL: &str = "The model could not confidently determine emotions from the provided \
                           messages. The emotional signal appears very weak or ambiguous.";

/// Fixed closing sentence.
const CLOSING: &str = "This analysis can support more empathetic responses and better \
                       understanding of the user's emotional state over time.";

/// Describe the dominant emotion(s), their share, and overall intensity.
///
/// Percentages are shares of the confidently detected ("valid") items only;
/// `error` and `uncertain` items are excluded from both the ranking and the
/// mean-score intensity hint.
pub fn generate_summary(timeline: &[TimelineItem]) -> String {
    if timeline.is_empty() {
        return NO_MESSAGES.to_owned();
    }

    let valid: Vec<&TimelineItem> = timeline.iter().filter(|i| i.is_valid()).collect();
    if valid.is_empty() {
        return WEAK_SIGNAL.to_owned();
    }

    let ranked = ranked_valid_counts(timeline);
    let total = valid.len();
    let mut lines: Vec<String> = Vec::new();

    let (primary, count) = &ranked[0];
    let pct = (*count as f32 / total as f32) * 100.0;
    lines.push(format!(
        "The dominant emotion in this conversation is **{primary}** \
         (~{pct:.1}% of the confidently detected messages)."
    ));

    if ranked.len() > 1 {
        let others: Vec<String> = ranked[1..]
            .iter()
            .take(2)
            .map(|(emotion, count)| {
                let pct = (*count as f32 / total as f32) * 100.0;
                format!("{emotion} (~{pct:.1}%)")
            })
            .collect();
        lines.push(format!(
            "Other noticeable emotions include: {}.",
            others.join(", ")
        ));
    }

    let avg_score: f32 = valid.iter().map(|i| i.score).sum::<f32>() / total as f32;
    let intensity = if avg_score > 0.8 {
        "Emotions are expressed very strongly and consistently."
    } else if avg_score > 0.6 {
        "Emotions are fairly strong and noticeable throughout."
    } else {
        "Emotions are present but somewhat mixed or mild."
    };
    lines.push(intensity.to_owned());

    lines.push(CLOSING.to_owned());

    lines.join(" ")
}
