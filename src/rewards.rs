//! Rewards ledger.
//!
//! Process-wide accumulator of gamification points granted for selecting
//! low-congestion routes. Owned explicitly and injected where needed; there
//! is no global state and no persistence beyond the process lifetime.

use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardsLedger {
    total: u64,
    unseen: bool,
}

impl RewardsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add points and flag them as not yet viewed. The unsigned parameter
    /// makes the non-negativity requirement unrepresentable.
    pub fn add_points(&mut self, points: u32) {
        self.total += u64::from(points);
        self.unseen = true;
        debug!(points, total = self.total, "reward points added");
    }

    /// Acknowledge the badge; the total is unchanged.
    pub fn mark_viewed(&mut self) {
        self.unseen = false;
    }

    pub fn reset(&mut self) {
        self.total = 0;
        self.unseen = false;
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn has_unseen(&self) -> bool {
        self.unseen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_accumulate_and_flag_unseen() {
        let mut ledger = RewardsLedger::new();
        ledger.add_points(5);
        ledger.add_points(3);
        assert_eq!(ledger.total(), 8);
        assert!(ledger.has_unseen());
    }

    #[test]
    fn mark_viewed_keeps_total() {
        let mut ledger = RewardsLedger::new();
        ledger.add_points(8);
        ledger.mark_viewed();
        assert!(!ledger.has_unseen());
        assert_eq!(ledger.total(), 8);
    }

    #[test]
    fn reset_clears_everything() {
        let mut ledger = RewardsLedger::new();
        ledger.add_points(15);
        ledger.reset();
        assert_eq!(ledger.total(), 0);
        assert!(!ledger.has_unseen());
    }

    #[test]
    fn fresh_ledger_is_zero_and_seen() {
        let ledger = RewardsLedger::new();
        assert_eq!(ledger.total(), 0);
        assert!(!ledger.has_unseen());
    }
}
