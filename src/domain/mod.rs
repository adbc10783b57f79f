//! Domain layer - Core entities, outcomes and collaborator boundaries

pub mod error;
pub mod fanout;
pub mod ingestion;
pub mod rate_limit;
pub mod submission;

pub use error::DomainError;
pub use fanout::{EventBus, Notification, Notifier, SubmissionEvent, WorkItem, WorkQueue};
pub use ingestion::{
    BatchError, BatchReport, ContentPolicy, Outcome, ProcessingContext, RecordFailure,
    RejectReason,
};
pub use rate_limit::{RateWindow, RateWindowStore, VersionedWindow};
pub use submission::{
    BatchItemOutcome, Submission, SubmissionDraft, SubmissionId, SubmissionMetadata,
    SubmissionRepository,
};
