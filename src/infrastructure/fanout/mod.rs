//! Fan-out publisher and sink implementations

mod in_memory;
mod publisher;
mod webhook_notifier;

pub use in_memory::{InMemoryEventBus, InMemoryNotifier, InMemoryWorkQueue};
pub use publisher::{FanoutPublisher, FanoutReport};
pub use webhook_notifier::WebhookNotifier;
