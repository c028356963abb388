//! Dashboard stats and the background poller.
//!
//! The dashboard and heatmap pages consume a periodic read-only feed of
//! aggregate stats and congestion records. Polling runs on a worker bound
//! to the poller handle's lifetime: dropping the handle stops the worker,
//! so the loop can never outlive the consuming component.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::congestion::HeatmapRecord;
use crate::traits::DashboardProvider;

/// Aggregate stats from `GET /dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_routes_calculated: u64,
    #[serde(default)]
    pub total_incentives_given: u64,
    #[serde(default)]
    pub avg_congestion: f64,
}

/// Qualitative label for the stress index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StressLabel {
    Low,
    Moderate,
    High,
}

impl StressLabel {
    pub fn from_index(index: f64) -> Self {
        if index < 0.3 {
            StressLabel::Low
        } else if index < 0.7 {
            StressLabel::Moderate
        } else {
            StressLabel::High
        }
    }
}

impl DashboardStats {
    /// City Flow Stress Index in `[0, 1]`: normalized average congestion
    /// plus a capped route-volume factor.
    pub fn stress_index(&self) -> f64 {
        let base = self.avg_congestion / 2.0;
        let route_factor = (self.total_routes_calculated as f64 / 100.0).min(0.3);
        (base + route_factor).min(1.0)
    }

    pub fn stress_label(&self) -> StressLabel {
        StressLabel::from_index(self.stress_index())
    }
}

/// One delivery from the poller.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub heatmap: Vec<HeatmapRecord>,
}

/// Handle to the repeating dashboard fetch. Stops on `stop()` or drop.
#[derive(Debug)]
pub struct DashboardPoller {
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl DashboardPoller {
    /// Start polling `provider` every `interval`, delivering snapshots on
    /// the returned channel. Fetch failures are logged and skipped; the
    /// next tick retries naturally, there is no backoff or retry logic.
    pub fn start<P>(provider: P, interval: Duration) -> (Self, Receiver<DashboardSnapshot>)
    where
        P: DashboardProvider + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let worker = thread::spawn(move || {
            poll_loop(provider, interval, sender, stop_flag);
        });

        (Self { stop, worker: Some(worker) }, receiver)
    }

    /// Idempotent; joins the worker.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("dashboard poll worker panicked");
            }
        }
    }
}

impl Drop for DashboardPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn poll_loop<P: DashboardProvider>(
    provider: P,
    interval: Duration,
    sender: Sender<DashboardSnapshot>,
    stop: Arc<AtomicBool>,
) {
    loop {
        if stop.load(Ordering::Relaxed) {
            break;
        }

        match fetch_snapshot(&provider) {
            Ok(snapshot) => {
                if sender.send(snapshot).is_err() {
                    debug!("dashboard receiver dropped; stopping poll loop");
                    break;
                }
            }
            Err(err) => warn!(error = %err, "dashboard fetch failed; skipping tick"),
        }

        if !sleep_interruptibly(interval, &stop) {
            break;
        }
    }
}

fn fetch_snapshot<P: DashboardProvider>(
    provider: &P,
) -> Result<DashboardSnapshot, crate::backend::BackendError> {
    let stats = provider.dashboard_stats()?;
    let heatmap = provider.heatmap_records()?;
    Ok(DashboardSnapshot { stats, heatmap })
}

/// Sleep in small slices so a stop request is honored promptly.
/// Returns `false` when stopped mid-sleep.
fn sleep_interruptibly(total: Duration, stop: &AtomicBool) -> bool {
    let slice = Duration::from_millis(50);
    let mut remaining = total;
    while !remaining.is_zero() {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let step = remaining.min(slice);
        thread::sleep(step);
        remaining = remaining.saturating_sub(step);
    }
    !stop.load(Ordering::Relaxed)
}
