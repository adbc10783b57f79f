//! Messages sent to downstream consumers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::submission::Submission;

/// Source tag stamped on every event this service emits
pub const EVENT_SOURCE: &str = "ingest-gateway";

/// Event type for an accepted submission
pub const EVENT_KIND_ACCEPTED: &str = "submission.accepted";

/// Event describing an accepted submission, published to the event bus.
/// Carries identities only; consumers needing the payload read the store
/// or the work queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionEvent {
    /// Unique event id
    pub id: String,
    /// Emitting service tag
    pub source: String,
    /// Event type tag
    pub kind: String,
    pub submission_id: String,
    pub user: String,
    pub occurred_at: DateTime<Utc>,
}

impl SubmissionEvent {
    /// Builds the accepted-submission event for a persisted record
    pub fn accepted(submission: &Submission) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source: EVENT_SOURCE.to_string(),
            kind: EVENT_KIND_ACCEPTED.to_string(),
            submission_id: submission.id.as_str().to_string(),
            user: submission.user.clone(),
            occurred_at: Utc::now(),
        }
    }
}

/// Work-queue message carrying the full payload for downstream async
/// processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub submission_id: String,
    pub user: String,
    pub data: String,
}

impl From<&Submission> for WorkItem {
    fn from(submission: &Submission) -> Self {
        Self {
            submission_id: submission.id.as_str().to_string(),
            user: submission.user.clone(),
            data: submission.data.clone(),
        }
    }
}

/// Human-readable notification about an accepted submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub submission_id: String,
    pub user: String,
    pub text: String,
}

impl Notification {
    pub fn accepted(submission: &Submission) -> Self {
        Self {
            submission_id: submission.id.as_str().to_string(),
            user: submission.user.clone(),
            text: format!(
                "New submission '{}' accepted from user '{}'",
                submission.id, submission.user
            ),
        }
    }
}
