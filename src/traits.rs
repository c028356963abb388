//! Seam traits for external collaborators.
//!
//! The routing backend, the directions provider, and the dashboard feed are
//! all injected through these interfaces so the core state machines can be
//! exercised without any network.

use crate::backend::BackendError;
use crate::candidates::RouteCandidate;
use crate::congestion::HeatmapRecord;
use crate::dashboard::DashboardStats;
use crate::directions::DirectionsError;
use crate::geometry::LngLat;

/// Routing backend producing route candidates between two location ids.
pub trait RouteProvider {
    /// `POST /route` equivalent: one candidate.
    fn single_route(&self, source: &str, destination: &str)
    -> Result<RouteCandidate, BackendError>;

    /// `POST /routes/multiple` equivalent: one candidate per strategy.
    fn multiple_routes(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Vec<RouteCandidate>, BackendError>;
}

/// External directions provider resolving two coordinates to the best
/// driving path as an ordered coordinate sequence.
pub trait DirectionsProvider {
    fn driving_path(&self, from: LngLat, to: LngLat) -> Result<Vec<LngLat>, DirectionsError>;
}

/// Read-only feed of aggregate stats and heatmap records, polled
/// periodically by the dashboard.
pub trait DashboardProvider {
    fn dashboard_stats(&self) -> Result<DashboardStats, BackendError>;
    fn heatmap_records(&self) -> Result<Vec<HeatmapRecord>, BackendError>;
}

/// Source of randomness for non-decision-affecting insight text.
///
/// Injected so display flavor stays deterministic under test.
pub trait InsightPicker {
    /// Pick an index in `0..len`. `len` is always non-zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Round-robin picker, the deterministic default.
#[derive(Debug, Default, Clone)]
pub struct RotatingPicker {
    next: usize,
}

impl InsightPicker for RotatingPicker {
    fn pick(&mut self, len: usize) -> usize {
        let index = self.next % len;
        self.next = self.next.wrapping_add(1);
        index
    }
}
