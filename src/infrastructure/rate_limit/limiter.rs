//! Sliding-window admission limiter
//!
//! Quota Q over a trailing window of W seconds, per user. The check is a
//! read-prune-append-write cycle against the window store; without a
//! conditional write, two concurrent requests for the same user can both
//! observe Q-1 entries and both be admitted. The store's versioned put
//! closes that race: on a version conflict the whole check re-runs, with a
//! bounded attempt count so persistent contention fails closed instead of
//! over-admitting.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{DomainError, RateWindow, RateWindowStore};

/// Attempts before giving up on a contended window
const MAX_WRITE_ATTEMPTS: u32 = 4;

/// Per-user sliding-window rate limiter backed by a RateWindowStore
pub struct SlidingWindowLimiter {
    store: Arc<dyn RateWindowStore>,
    quota: u32,
    window_secs: i64,
}

impl SlidingWindowLimiter {
    pub fn new(store: Arc<dyn RateWindowStore>, quota: u32, window_secs: i64) -> Self {
        Self {
            store,
            quota,
            window_secs,
        }
    }

    /// Checks whether `user` may be admitted at instant `now` (unix
    /// seconds). An admitted call appends `now` to the stored window; a
    /// rejected call leaves stored state untouched, so refused attempts
    /// never count against the quota.
    pub async fn admit(&self, user: &str, now: i64) -> Result<bool, DomainError> {
        let cutoff = now - self.window_secs;

        for _ in 0..MAX_WRITE_ATTEMPTS {
            let stored = self.store.fetch(user).await?;
            let (mut window, version) = match stored {
                Some(v) => (v.window, Some(v.version)),
                None => (RateWindow::new(user), None),
            };

            window.prune(cutoff);

            if window.len() as u32 >= self.quota {
                debug!(user = %user, count = window.len(), "admission refused, window full");
                return Ok(false);
            }

            window.record(now);

            if self.store.put_if_version(window, version).await? {
                return Ok(true);
            }
            // Lost the write race; another request advanced the window.
            // Re-run the full check against the fresh state.
        }

        Err(DomainError::internal(format!(
            "Rate window for user '{}' stayed contended after {} attempts",
            user, MAX_WRITE_ATTEMPTS
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rate_limit::MockRateWindowStore;
    use crate::domain::VersionedWindow;
    use crate::infrastructure::rate_limit::InMemoryRateWindowStore;

    fn limiter(store: Arc<dyn RateWindowStore>) -> SlidingWindowLimiter {
        SlidingWindowLimiter::new(store, 3, 60)
    }

    #[tokio::test]
    async fn test_admits_up_to_quota_then_refuses() {
        let store = Arc::new(InMemoryRateWindowStore::new());
        let limiter = limiter(store);

        let t = 1_000;
        assert!(limiter.admit("alice", t).await.unwrap());
        assert!(limiter.admit("alice", t + 10).await.unwrap());
        assert!(limiter.admit("alice", t + 20).await.unwrap());
        assert!(!limiter.admit("alice", t + 30).await.unwrap());
    }

    #[tokio::test]
    async fn test_admits_again_after_oldest_expires() {
        let store = Arc::new(InMemoryRateWindowStore::new());
        let limiter = limiter(store);

        let t = 1_000;
        for offset in [0, 10, 20] {
            assert!(limiter.admit("alice", t + offset).await.unwrap());
        }
        assert!(!limiter.admit("alice", t + 30).await.unwrap());

        // At t+61 the first entry (t) is outside the trailing 60s window
        assert!(limiter.admit("alice", t + 61).await.unwrap());
    }

    #[tokio::test]
    async fn test_boundary_timestamp_is_expired() {
        let store = Arc::new(InMemoryRateWindowStore::new());
        let mut window = RateWindow::new("alice");
        window.timestamps = vec![940, 950, 960];
        store.put_if_version(window, None).await.unwrap();

        // now=1000, window=60: the entry at exactly now-W=940 is expired,
        // leaving two live entries, so the check admits
        let limiter = limiter(store);
        assert!(limiter.admit("alice", 1_000).await.unwrap());
    }

    #[tokio::test]
    async fn test_refusal_does_not_mutate_window() {
        let store = Arc::new(InMemoryRateWindowStore::new());
        let limiter = SlidingWindowLimiter::new(store.clone(), 1, 60);

        assert!(limiter.admit("alice", 100).await.unwrap());
        assert!(!limiter.admit("alice", 110).await.unwrap());
        assert!(!limiter.admit("alice", 120).await.unwrap());

        let stored = store.fetch("alice").await.unwrap().unwrap();
        assert_eq!(stored.window.timestamps, vec![100]);
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn test_users_are_limited_independently() {
        let store = Arc::new(InMemoryRateWindowStore::new());
        let limiter = SlidingWindowLimiter::new(store, 1, 60);

        assert!(limiter.admit("alice", 100).await.unwrap());
        assert!(!limiter.admit("alice", 110).await.unwrap());
        assert!(limiter.admit("bob", 110).await.unwrap());
    }

    #[tokio::test]
    async fn test_recheck_after_write_conflict() {
        let mut store = MockRateWindowStore::new();

        // First round: empty window, but the conditional create loses
        store.expect_fetch().times(1).returning(|_| Ok(None));
        store
            .expect_put_if_version()
            .times(1)
            .returning(|_, expected| {
                assert!(expected.is_none());
                Ok(false)
            });

        // Second round: sees the winner's entry and still fits the quota
        store.expect_fetch().times(1).returning(|user| {
            let mut window = RateWindow::new(user);
            window.record(95);
            Ok(Some(VersionedWindow { window, version: 1 }))
        });
        store
            .expect_put_if_version()
            .times(1)
            .returning(|window, expected| {
                assert_eq!(expected, Some(1));
                assert_eq!(window.timestamps, vec![95, 100]);
                Ok(true)
            });

        let limiter = limiter(Arc::new(store));
        assert!(limiter.admit("alice", 100).await.unwrap());
    }

    #[tokio::test]
    async fn test_persistent_contention_fails_closed() {
        let mut store = MockRateWindowStore::new();
        store.expect_fetch().returning(|_| Ok(None));
        store.expect_put_if_version().returning(|_, _| Ok(false));

        let limiter = limiter(Arc::new(store));
        let result = limiter.admit("alice", 100).await;
        assert!(result.is_err());
    }
}
