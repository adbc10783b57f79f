//! Per-user rate window state

use serde::{Deserialize, Serialize};

/// The trailing admission window for one user: the unix timestamps of
/// recent admitted submissions. Entries older than the window are pruned
/// lazily on each check; the row itself is never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateWindow {
    pub user: String,
    pub timestamps: Vec<i64>,
}

impl RateWindow {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            timestamps: Vec::new(),
        }
    }

    /// Drops entries at or before the cutoff. A timestamp exactly at the
    /// window boundary counts as expired.
    pub fn prune(&mut self, cutoff: i64) {
        self.timestamps.retain(|&t| t > cutoff);
    }

    /// Records an admission at the given instant
    pub fn record(&mut self, now: i64) {
        self.timestamps.push(now);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// A rate window together with the store's optimistic-concurrency version,
/// used for conditional writes.
#[derive(Debug, Clone)]
pub struct VersionedWindow {
    pub window: RateWindow,
    pub version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_is_strict_at_boundary() {
        let mut window = RateWindow::new("alice");
        window.timestamps = vec![40, 100, 160];

        // cutoff 100: the boundary entry expires, strictly-newer survive
        window.prune(100);
        assert_eq!(window.timestamps, vec![160]);
    }

    #[test]
    fn test_record_appends() {
        let mut window = RateWindow::new("alice");
        window.record(10);
        window.record(20);
        assert_eq!(window.len(), 2);
        assert_eq!(window.timestamps, vec![10, 20]);
    }

    #[test]
    fn test_new_window_is_empty() {
        assert!(RateWindow::new("alice").is_empty());
    }
}
