//! In-memory submission repository

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{
    BatchItemOutcome, DomainError, Submission, SubmissionId, SubmissionRepository,
};

/// In-memory implementation of SubmissionRepository, used for local runs
/// and tests. Create is conditional on the id the same way a durable store
/// with a conditional put would be.
pub struct InMemorySubmissionRepository {
    records: RwLock<HashMap<String, Submission>>,
}

impl InMemorySubmissionRepository {
    /// Creates a new empty repository
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a repository pre-seeded with records (test helper)
    pub fn with_records(records: Vec<Submission>) -> Self {
        let map = records
            .into_iter()
            .map(|s| (s.id.as_str().to_string(), s))
            .collect();
        Self {
            records: RwLock::new(map),
        }
    }
}

impl Default for InMemorySubmissionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn get(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError> {
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        Ok(records.get(id.as_str()).cloned())
    }

    async fn exists(&self, id: &SubmissionId) -> Result<bool, DomainError> {
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        Ok(records.contains_key(id.as_str()))
    }

    async fn create(&self, submission: Submission) -> Result<Submission, DomainError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        let id = submission.id.as_str().to_string();

        if records.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "Submission with id '{}' already exists",
                id
            )));
        }

        records.insert(id, submission.clone());
        Ok(submission)
    }

    async fn create_batch(
        &self,
        submissions: Vec<Submission>,
    ) -> Result<Vec<BatchItemOutcome>, DomainError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        let mut outcomes = Vec::with_capacity(submissions.len());

        for submission in submissions {
            let id = submission.id.clone();
            let key = id.as_str().to_string();

            if records.contains_key(&key) {
                outcomes.push(BatchItemOutcome::failed(
                    id,
                    DomainError::conflict(format!("Submission with id '{}' already exists", key)),
                ));
            } else {
                records.insert(key, submission);
                outcomes.push(BatchItemOutcome::persisted(id));
            }
        }

        Ok(outcomes)
    }

    async fn list(&self) -> Result<Vec<Submission>, DomainError> {
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        let mut result: Vec<_> = records.values().cloned().collect();
        result.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubmissionMetadata;

    fn submission(id: &str) -> Submission {
        Submission::new(
            id,
            "payload",
            "alice",
            SubmissionMetadata::generate(None, "gateway-1"),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemorySubmissionRepository::new();

        repo.create(submission("sub-1")).await.unwrap();

        let found = repo.get(&SubmissionId::new("sub-1")).await.unwrap();
        assert_eq!(found.unwrap().id.as_str(), "sub-1");
        assert!(repo.exists(&SubmissionId::new("sub-1")).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_conflict_on_existing_id() {
        let repo = InMemorySubmissionRepository::new();

        repo.create(submission("sub-1")).await.unwrap();
        let result = repo.create(submission("sub-1")).await;

        assert!(matches!(result, Err(ref e) if e.is_conflict()));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = InMemorySubmissionRepository::new();

        assert!(repo.get(&SubmissionId::new("nope")).await.unwrap().is_none());
        assert!(!repo.exists(&SubmissionId::new("nope")).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_batch_reports_per_item() {
        let repo = InMemorySubmissionRepository::with_records(vec![submission("taken")]);

        let outcomes = repo
            .create_batch(vec![submission("a"), submission("taken"), submission("b")])
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_persisted());
        assert!(!outcomes[1].is_persisted());
        assert!(outcomes[2].is_persisted());
        assert_eq!(repo.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_id() {
        let repo = InMemorySubmissionRepository::new();
        repo.create(submission("b")).await.unwrap();
        repo.create(submission("a")).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all[0].id.as_str(), "a");
        assert_eq!(all[1].id.as_str(), "b");
    }
}
