//! Downstream sink traits

use async_trait::async_trait;

use crate::domain::error::DomainError;

use super::message::{Notification, SubmissionEvent, WorkItem};

#[cfg(test)]
use mockall::automock;

/// Event bus sink. Delivery is at-least-once; consumers must tolerate
/// duplicate events for the same submission id.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, event: SubmissionEvent) -> Result<(), DomainError>;
}

/// Work queue sink for downstream async processing
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WorkQueue: Send + Sync {
    async fn enqueue(&self, item: WorkItem) -> Result<(), DomainError>;
}

/// Optional human-facing notification sink
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_sinks() {
        let mut bus = MockEventBus::new();
        bus.expect_publish().returning(|_| Ok(()));

        let mut queue = MockWorkQueue::new();
        queue
            .expect_enqueue()
            .returning(|_| Err(DomainError::sink("work_queue", "unavailable")));

        let event = SubmissionEvent {
            id: "evt-1".to_string(),
            source: "test".to_string(),
            kind: "test".to_string(),
            submission_id: "sub-1".to_string(),
            user: "alice".to_string(),
            occurred_at: chrono::Utc::now(),
        };
        assert!(bus.publish(event).await.is_ok());

        let item = WorkItem {
            submission_id: "sub-1".to_string(),
            user: "alice".to_string(),
            data: "payload".to_string(),
        };
        assert!(queue.enqueue(item).await.is_err());
    }
}
