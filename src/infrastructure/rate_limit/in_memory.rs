//! In-memory rate window store with versioned writes

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{DomainError, RateWindow, RateWindowStore, VersionedWindow};

/// In-memory implementation of RateWindowStore. Versions start at 1 and
/// advance on every successful write, mirroring the optimistic-concurrency
/// token a durable key-value store would provide.
pub struct InMemoryRateWindowStore {
    windows: RwLock<HashMap<String, (u64, RateWindow)>>,
}

impl InMemoryRateWindowStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRateWindowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateWindowStore for InMemoryRateWindowStore {
    async fn fetch(&self, user: &str) -> Result<Option<VersionedWindow>, DomainError> {
        let windows = self
            .windows
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        Ok(windows.get(user).map(|(version, window)| VersionedWindow {
            window: window.clone(),
            version: *version,
        }))
    }

    async fn put_if_version(
        &self,
        window: RateWindow,
        expected: Option<u64>,
    ) -> Result<bool, DomainError> {
        let mut windows = self
            .windows
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        let current = windows.get(&window.user).map(|(version, _)| *version);

        match (expected, current) {
            (None, None) => {
                windows.insert(window.user.clone(), (1, window));
                Ok(true)
            }
            (Some(expected), Some(current)) if expected == current => {
                windows.insert(window.user.clone(), (current + 1, window));
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_missing_user() {
        let store = InMemoryRateWindowStore::new();
        assert!(store.fetch("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_then_fetch() {
        let store = InMemoryRateWindowStore::new();

        let mut window = RateWindow::new("alice");
        window.record(10);
        assert!(store.put_if_version(window, None).await.unwrap());

        let fetched = store.fetch("alice").await.unwrap().unwrap();
        assert_eq!(fetched.version, 1);
        assert_eq!(fetched.window.timestamps, vec![10]);
    }

    #[tokio::test]
    async fn test_create_conflicts_when_row_appeared() {
        let store = InMemoryRateWindowStore::new();

        assert!(
            store
                .put_if_version(RateWindow::new("alice"), None)
                .await
                .unwrap()
        );
        // A second writer that read "absent" loses the race
        assert!(
            !store
                .put_if_version(RateWindow::new("alice"), None)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_stale_version_is_refused() {
        let store = InMemoryRateWindowStore::new();

        store
            .put_if_version(RateWindow::new("alice"), None)
            .await
            .unwrap();
        assert!(
            store
                .put_if_version(RateWindow::new("alice"), Some(1))
                .await
                .unwrap()
        );

        // version is now 2; a writer still holding 1 must fail
        assert!(
            !store
                .put_if_version(RateWindow::new("alice"), Some(1))
                .await
                .unwrap()
        );

        let fetched = store.fetch("alice").await.unwrap().unwrap();
        assert_eq!(fetched.version, 2);
    }
}
