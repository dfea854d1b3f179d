//! Emotional arc description (start → middle → end).

use super::TimelineItem;

/// Fixed response when the timeline is too short for a trend.
const NOT_ENOUGH: &str = "Not enough messages to determine an emotional trend.";

/// Describe the emotional arc of the conversation.
///
/// Reads the labels at index 0, `len / 2`, and `len - 1`. For even-length
/// timelines the integer division lands just past the true midpoint; that
/// indexing is part of the contract. A second sentence names the shift when
/// the start and end labels differ.
pub fn generate_trend(timeline: &[TimelineItem]) -> String {
    if timeline.len() < 2 {
        return NOT_ENOUGH.to_owned();
    }

    let start = &timeline[0].emotion;
    let middle = &timeline[timeline.len() / 2].emotion;
    let end = &timeline[timeline.len() - 1].emotion;

    let mut trend = format!(
        "The conversation begins with {start}, shifts to {middle} in the middle, \
         and ends with {end}."
    );

    if start != end {
        trend.push_str(&format!(
            " This indicates an emotional shift from {start} to {end}."
        ));
    }

    trend
}
