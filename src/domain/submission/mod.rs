//! Submission entity and repository boundary

mod entity;
mod repository;

pub use entity::{Submission, SubmissionDraft, SubmissionId, SubmissionMetadata};
pub use repository::{BatchItemOutcome, SubmissionRepository};

#[cfg(test)]
pub use repository::MockSubmissionRepository;
