//! Route candidates and the selection store.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Optimization strategy a candidate was produced with.
///
/// Serialized with the backend's display names ("Fastest Route" etc.),
/// which double as the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteStrategy {
    #[serde(rename = "Fastest Route")]
    Fastest,
    #[serde(rename = "Least Congestion")]
    LeastCongestion,
    #[serde(rename = "Scenic Route")]
    Scenic,
    #[serde(rename = "Shortest Distance")]
    Shortest,
}

impl RouteStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            RouteStrategy::Fastest => "Fastest Route",
            RouteStrategy::LeastCongestion => "Least Congestion",
            RouteStrategy::Scenic => "Scenic Route",
            RouteStrategy::Shortest => "Shortest Distance",
        }
    }
}

/// Backend confidence label, derived server-side from the congestion score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// One proposed route with its metadata, as returned by the routing backend.
///
/// A failed request is represented as a candidate whose `error` is set; the
/// other fields stay at their defaults so the candidate still renders inline
/// without blocking its siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    /// Absent on single-route responses, which carry no strategy field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<RouteStrategy>,
    /// Ordered location ids. Intermediate nodes are for logic and display
    /// only; geometry resolution uses the endpoints.
    #[serde(default)]
    pub route: Vec<String>,
    /// Total travel time in minutes.
    #[serde(default)]
    pub total_time: f64,
    #[serde(default)]
    pub congestion_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RouteCandidate {
    /// Empty sentinel used when nothing is selected.
    pub fn empty() -> Self {
        Self {
            strategy: None,
            route: Vec::new(),
            total_time: 0.0,
            congestion_score: 0.0,
            reward_points: None,
            confidence: None,
            explanation: None,
            error: None,
        }
    }

    /// A candidate carrying only a request error.
    pub fn failed(message: impl Into<String>) -> Self {
        let mut candidate = Self::empty();
        candidate.error = Some(message.into());
        candidate
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// First and last location ids, `None` when the path is too short to
    /// resolve into geometry.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        if self.route.len() < 2 {
            return None;
        }
        Some((
            self.route.first().map(String::as_str)?,
            self.route.last().map(String::as_str)?,
        ))
    }
}

/// Ordered candidate list plus the selected index.
///
/// The selection index is valid whenever the list is non-empty; replacing
/// the list resets it to 0 and out-of-range selects are ignored.
#[derive(Debug, Clone, Default)]
pub struct RouteCandidateStore {
    candidates: Vec<RouteCandidate>,
    selected: usize,
}

impl RouteCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list and select the first candidate.
    pub fn replace_all(&mut self, candidates: Vec<RouteCandidate>) {
        self.candidates = candidates;
        self.selected = 0;
    }

    /// Select a candidate by index. Out-of-range indices leave the
    /// selection unchanged; selecting on an empty list is a no-op.
    pub fn select(&mut self, index: usize) {
        if index < self.candidates.len() {
            self.selected = index;
        } else {
            debug!(index, len = self.candidates.len(), "ignoring out-of-range selection");
        }
    }

    /// The selected candidate, or the empty sentinel when the list is empty.
    pub fn current(&self) -> RouteCandidate {
        self.candidates
            .get(self.selected)
            .cloned()
            .unwrap_or_else(RouteCandidate::empty)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn candidates(&self) -> &[RouteCandidate] {
        &self.candidates
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
