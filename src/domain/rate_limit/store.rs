//! Rate window store trait

use async_trait::async_trait;

use crate::domain::error::DomainError;

use super::entity::{RateWindow, VersionedWindow};

#[cfg(test)]
use mockall::automock;

/// Keyed storage of per-user rate windows with conditional writes.
///
/// The read-prune-append-write cycle the limiter runs is only correct if
/// the final write is conditional on the version it read, so the store
/// exposes compare-and-swap semantics rather than a plain put.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RateWindowStore: Send + Sync {
    /// Fetches the stored window for a user, with its current version
    async fn fetch(&self, user: &str) -> Result<Option<VersionedWindow>, DomainError>;

    /// Writes the window iff the stored version still matches `expected`
    /// (`None` means create-if-absent). Returns false on a version
    /// conflict, leaving the stored state untouched.
    async fn put_if_version(
        &self,
        window: RateWindow,
        expected: Option<u64>,
    ) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store() {
        let mut mock = MockRateWindowStore::new();

        mock.expect_fetch().returning(|_| Ok(None));
        mock.expect_put_if_version().returning(|_, _| Ok(true));

        assert!(mock.fetch("alice").await.unwrap().is_none());
        assert!(
            mock.put_if_version(RateWindow::new("alice"), None)
                .await
                .unwrap()
        );
    }
}
