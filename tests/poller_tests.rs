//! Dashboard poller tests: delivery, failure skipping, and prompt stop.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use fluxora_view::backend::BackendError;
use fluxora_view::congestion::HeatmapRecord;
use fluxora_view::dashboard::{DashboardPoller, DashboardStats};
use fluxora_view::traits::DashboardProvider;

struct CountingProvider {
    calls: Arc<AtomicUsize>,
    fail_first: bool,
}

impl DashboardProvider for CountingProvider {
    fn dashboard_stats(&self) -> Result<DashboardStats, BackendError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_first && call == 0 {
            return Err(BackendError::Unavailable("warming up".to_string()));
        }
        Ok(DashboardStats {
            total_routes_calculated: call as u64,
            total_incentives_given: 1,
            avg_congestion: 1.4,
        })
    }

    fn heatmap_records(&self) -> Result<Vec<HeatmapRecord>, BackendError> {
        Ok(vec![HeatmapRecord {
            road: "Anna Nagar → T Nagar".to_string(),
            congestion: 1.24,
            confidence: None,
        }])
    }
}

#[test]
fn poller_delivers_snapshots() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CountingProvider { calls: Arc::clone(&calls), fail_first: false };

    let (mut poller, receiver) = DashboardPoller::start(provider, Duration::from_millis(10));
    let snapshot = receiver.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(snapshot.heatmap.len(), 1);
    assert_eq!(snapshot.stats.total_incentives_given, 1);
    poller.stop();
}

#[test]
fn fetch_failure_skips_tick_and_keeps_polling() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CountingProvider { calls: Arc::clone(&calls), fail_first: true };

    let (mut poller, receiver) = DashboardPoller::start(provider, Duration::from_millis(10));
    // The first fetch fails; a later tick still delivers.
    let snapshot = receiver.recv_timeout(Duration::from_secs(2)).unwrap();
    assert!(snapshot.stats.total_routes_calculated >= 1);
    poller.stop();
    assert!(calls.load(Ordering::SeqCst) >= 2);
}

#[test]
fn stop_is_prompt_and_idempotent() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CountingProvider { calls, fail_first: false };

    let (mut poller, _receiver) = DashboardPoller::start(provider, Duration::from_secs(60));
    let started = Instant::now();
    poller.stop();
    poller.stop();
    // Stopping must not wait out the 60 s interval.
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn dropping_the_handle_stops_the_worker() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CountingProvider { calls: Arc::clone(&calls), fail_first: false };

    {
        let (_poller, receiver) = DashboardPoller::start(provider, Duration::from_millis(10));
        let _ = receiver.recv_timeout(Duration::from_secs(2)).unwrap();
    }
    // Handle dropped; no further fetches should accumulate.
    let after_drop = calls.load(Ordering::SeqCst);
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(calls.load(Ordering::SeqCst), after_drop);
}
