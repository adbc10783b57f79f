//! Multi-sink fan-out for accepted submissions
//!
//! Persistence has already committed by the time publish runs; each sink
//! send is independent and best-effort. A failed sink never blocks or
//! rolls back the others, and never fails the client request. Failures are
//! logged and counted so they can be reconciled out-of-band.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{
    EventBus, Notification, Notifier, Submission, SubmissionEvent, WorkItem, WorkQueue,
};
use crate::infrastructure::retry::{RetryPolicy, with_retries};

/// Per-sink delivery flags for one publish call. `notification` is None
/// when no notifier is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanoutReport {
    pub event_delivered: bool,
    pub queue_delivered: bool,
    pub notification_delivered: Option<bool>,
}

impl FanoutReport {
    /// True when every configured sink received the submission
    pub fn all_delivered(&self) -> bool {
        self.event_delivered
            && self.queue_delivered
            && self.notification_delivered.unwrap_or(true)
    }
}

/// Pushes an accepted submission to the event bus, the work queue and,
/// when configured, a notification channel.
pub struct FanoutPublisher {
    event_bus: Arc<dyn EventBus>,
    work_queue: Arc<dyn WorkQueue>,
    notifier: Option<Arc<dyn Notifier>>,
    retry: RetryPolicy,
}

impl FanoutPublisher {
    pub fn new(event_bus: Arc<dyn EventBus>, work_queue: Arc<dyn WorkQueue>) -> Self {
        Self {
            event_bus,
            work_queue,
            notifier: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Adds the optional notification sink
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Overrides the per-send retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sends the three messages concurrently. Sends are at-least-once
    /// (retried on transient failure); the report says which sinks took
    /// delivery.
    pub async fn publish(&self, submission: &Submission) -> FanoutReport {
        let event = SubmissionEvent::accepted(submission);
        let item = WorkItem::from(submission);

        let event_send = with_retries(&self.retry, || self.event_bus.publish(event.clone()));
        let queue_send = with_retries(&self.retry, || self.work_queue.enqueue(item.clone()));
        let notify_send = async {
            match &self.notifier {
                Some(notifier) => {
                    let notification = Notification::accepted(submission);
                    Some(with_retries(&self.retry, || notifier.notify(notification.clone())).await)
                }
                None => None,
            }
        };

        let (event_result, queue_result, notify_result) =
            tokio::join!(event_send, queue_send, notify_send);

        let event_delivered = Self::observe("event_bus", submission, event_result);
        let queue_delivered = Self::observe("work_queue", submission, queue_result);
        let notification_delivered =
            notify_result.map(|r| Self::observe("notifier", submission, r));

        FanoutReport {
            event_delivered,
            queue_delivered,
            notification_delivered,
        }
    }

    fn observe(
        sink: &'static str,
        submission: &Submission,
        result: Result<(), crate::domain::DomainError>,
    ) -> bool {
        match result {
            Ok(()) => true,
            Err(error) => {
                warn!(
                    sink = sink,
                    submission_id = %submission.id,
                    error = %error,
                    "Fan-out send failed; record is stored but this sink missed it"
                );
                metrics::counter!("fanout_failures_total", "sink" => sink).increment(1);
                false
            }
        }
    }
}
