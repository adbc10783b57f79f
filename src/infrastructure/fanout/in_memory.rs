//! In-memory sink implementations
//!
//! Used for local runs and tests; each sink records what was sent so
//! callers can inspect deliveries.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{
    DomainError, EventBus, Notification, Notifier, SubmissionEvent, WorkItem, WorkQueue,
};

/// In-memory event bus
pub struct InMemoryEventBus {
    events: RwLock<Vec<SubmissionEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    /// Events published so far, in order
    pub fn published(&self) -> Vec<SubmissionEvent> {
        self.events.read().map(|e| e.clone()).unwrap_or_default()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: SubmissionEvent) -> Result<(), DomainError> {
        self.events
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?
            .push(event);
        Ok(())
    }
}

/// In-memory work queue
pub struct InMemoryWorkQueue {
    items: RwLock<Vec<WorkItem>>,
}

impl InMemoryWorkQueue {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Items enqueued so far, in order
    pub fn enqueued(&self) -> Vec<WorkItem> {
        self.items.read().map(|i| i.clone()).unwrap_or_default()
    }
}

impl Default for InMemoryWorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkQueue for InMemoryWorkQueue {
    async fn enqueue(&self, item: WorkItem) -> Result<(), DomainError> {
        self.items
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?
            .push(item);
        Ok(())
    }
}

/// In-memory notifier
pub struct InMemoryNotifier {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self {
            notifications: RwLock::new(Vec::new()),
        }
    }

    /// Notifications sent so far, in order
    pub fn sent(&self) -> Vec<Notification> {
        self.notifications
            .read()
            .map(|n| n.clone())
            .unwrap_or_default()
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), DomainError> {
        self.notifications
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?
            .push(notification);
        Ok(())
    }
}
