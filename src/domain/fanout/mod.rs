//! Fan-out messages and downstream sink boundaries

mod message;
mod sink;

pub use message::{
    EVENT_KIND_ACCEPTED, EVENT_SOURCE, Notification, SubmissionEvent, WorkItem,
};
pub use sink::{EventBus, Notifier, WorkQueue};

#[cfg(test)]
pub use sink::{MockEventBus, MockNotifier, MockWorkQueue};
