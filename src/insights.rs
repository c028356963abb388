//! Explanatory insight text.
//!
//! Display flavor only; nothing here affects routing or selection. The
//! phrase choice goes through an injectable [`InsightPicker`] so output is
//! deterministic wherever that matters.

use crate::candidates::{RouteCandidate, RouteStrategy};
use crate::traits::InsightPicker;

const SCENIC_INSIGHTS: [&str; 5] = [
    "Perfect for a leisurely drive with scenic stops",
    "Enjoy the journey at a relaxed pace through interesting areas",
    "Take the longer route for a more pleasant experience",
    "Explore alternative areas with less traffic pressure",
    "Great for sightseeing and enjoying the ride",
];

const GENERAL_INSIGHTS: [&str; 4] = [
    "Avoids expected crowd surge near the event zone",
    "Optimized for real-time traffic patterns and incident avoidance",
    "Selected based on historical flow analysis and current conditions",
    "Minimizes travel time during peak hour compression",
];

/// Pick an insight line for a candidate.
///
/// Non-scenic candidates occasionally get a congestion-derived phrase in
/// place of a canned one, mirroring the backend's flavor text.
pub fn route_insight(candidate: &RouteCandidate, picker: &mut impl InsightPicker) -> String {
    if candidate.strategy == Some(RouteStrategy::Scenic) {
        return SCENIC_INSIGHTS[picker.pick(SCENIC_INSIGHTS.len())].to_string();
    }

    // Slot 0 is the computed phrase, the rest come from the fixed list.
    let slot = picker.pick(GENERAL_INSIGHTS.len() + 1);
    if slot == 0 {
        let reduction = ((2.0 - candidate.congestion_score) * 20.0) as i64;
        format!(
            "Chosen to reduce predicted congestion by {}% in the next 20 minutes",
            reduction
        )
    } else {
        GENERAL_INSIGHTS[slot - 1].to_string()
    }
}
