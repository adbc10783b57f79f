//! Submission repository trait

use async_trait::async_trait;

use crate::domain::error::DomainError;

use super::entity::{Submission, SubmissionId};

#[cfg(test)]
use mockall::automock;

/// Per-item result of a batch write. The store may reject individual items
/// without failing the whole batch; callers must not assume all-or-nothing.
#[derive(Debug)]
pub struct BatchItemOutcome {
    pub id: SubmissionId,
    pub error: Option<DomainError>,
}

impl BatchItemOutcome {
    pub fn persisted(id: SubmissionId) -> Self {
        Self { id, error: None }
    }

    pub fn failed(id: SubmissionId, error: DomainError) -> Self {
        Self {
            id,
            error: Some(error),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.error.is_none()
    }
}

/// Durable keyed storage of accepted submissions.
///
/// Submissions are immutable, so there is no update operation; `create` is
/// conditional on the id not existing yet and fails with a conflict
/// otherwise.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Retrieves a submission by id
    async fn get(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError>;

    /// Live existence probe by id, reflecting the most recent committed state
    async fn exists(&self, id: &SubmissionId) -> Result<bool, DomainError>;

    /// Persists a submission, failing with a conflict if the id exists
    async fn create(&self, submission: Submission) -> Result<Submission, DomainError>;

    /// Persists a batch with per-item results, in input order
    async fn create_batch(
        &self,
        submissions: Vec<Submission>,
    ) -> Result<Vec<BatchItemOutcome>, DomainError>;

    /// Returns every stored submission
    async fn list(&self) -> Result<Vec<Submission>, DomainError>;
}
