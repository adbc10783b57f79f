//! Submission ingestion pipeline
//!
//! Orchestrates admission control (field checks, content policy, sliding
//! window rate limit, duplicate probe), persistence and fan-out for single
//! and bulk requests. The service holds no durable state of its own; every
//! instance is a stateless orchestrator over its injected collaborators.
//!
//! Persistence and fan-out are deliberately not transactional: a record is
//! durably stored before any sink send is attempted, and a failed send
//! never revokes the client's acceptance. Sink misses are logged and
//! counted for out-of-band reconciliation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, info};

use crate::domain::{
    BatchError, BatchReport, ContentPolicy, DomainError, Outcome, ProcessingContext,
    RecordFailure, RejectReason, Submission, SubmissionDraft, SubmissionId, SubmissionMetadata,
    SubmissionRepository,
    ingestion::{check_required_fields, validate_submission_id},
};
use crate::infrastructure::fanout::FanoutPublisher;
use crate::infrastructure::rate_limit::SlidingWindowLimiter;

/// Trait for ingestion pipeline operations
#[async_trait]
pub trait IngestionServiceTrait: Send + Sync {
    /// Runs one record through admission, persistence and fan-out
    async fn process_single(
        &self,
        draft: SubmissionDraft,
        ctx: ProcessingContext,
    ) -> Result<Outcome, DomainError>;

    /// Runs a batch of records independently; failures never abort the
    /// rest of the batch
    async fn process_batch(
        &self,
        drafts: Vec<SubmissionDraft>,
        ctx: ProcessingContext,
    ) -> Result<BatchReport, DomainError>;

    /// Fetches a stored submission by id
    async fn get(&self, id: &str) -> Result<Option<Submission>, DomainError>;

    /// Returns every stored submission
    async fn list(&self) -> Result<Vec<Submission>, DomainError>;
}

/// Ingestion pipeline implementation
pub struct IngestionService {
    submissions: Arc<dyn SubmissionRepository>,
    limiter: SlidingWindowLimiter,
    policy: ContentPolicy,
    publisher: FanoutPublisher,
}

impl IngestionService {
    pub fn new(
        submissions: Arc<dyn SubmissionRepository>,
        limiter: SlidingWindowLimiter,
        policy: ContentPolicy,
        publisher: FanoutPublisher,
    ) -> Self {
        Self {
            submissions,
            limiter,
            policy,
            publisher,
        }
    }

    /// Runs the admission checks for one record. The outer Result is an
    /// infrastructure failure; the inner one is the admission verdict.
    /// Order matters: field and content checks are pure and run first, a
    /// refused record must not consume rate quota, and the duplicate probe
    /// runs last against live store state.
    async fn run_admission(
        &self,
        draft: &SubmissionDraft,
        now: i64,
    ) -> Result<Result<(), RejectReason>, DomainError> {
        if let Err(reason) = check_required_fields(draft) {
            return Ok(Err(reason));
        }

        let id = draft.id.as_deref().unwrap_or_default();
        let data = draft.data.as_deref().unwrap_or_default();
        let user = draft.user.as_deref().unwrap_or_default();

        if let Some(term) = self.policy.find_prohibited(data) {
            return Ok(Err(RejectReason::ProhibitedContent {
                term: term.to_string(),
            }));
        }

        if !self.limiter.admit(user, now).await? {
            return Ok(Err(RejectReason::RateLimitExceeded));
        }

        if self.submissions.exists(&SubmissionId::new(id)).await? {
            return Ok(Err(RejectReason::DuplicateId));
        }

        Ok(Ok(()))
    }

    /// Builds the persistable record with generated metadata
    fn build_record(&self, draft: &SubmissionDraft, ctx: &ProcessingContext) -> Submission {
        Submission::new(
            draft.id.as_deref().unwrap_or_default(),
            draft.data.as_deref().unwrap_or_default(),
            draft.user.as_deref().unwrap_or_default(),
            SubmissionMetadata::generate(ctx.source.clone(), ctx.processor.clone()),
        )
    }
}

#[async_trait]
impl IngestionServiceTrait for IngestionService {
    async fn process_single(
        &self,
        draft: SubmissionDraft,
        ctx: ProcessingContext,
    ) -> Result<Outcome, DomainError> {
        let now = Utc::now().timestamp();

        if let Err(reason) = self.run_admission(&draft, now).await? {
            debug!(reason = reason.code(), "Submission refused admission");
            metrics::counter!("admission_rejections_total", "reason" => reason.code())
                .increment(1);
            return Ok(Outcome::Rejected(reason));
        }

        let record = self.build_record(&draft, &ctx);
        let stored = match self.submissions.create(record).await {
            Ok(stored) => stored,
            // The exists probe and the write race against concurrent
            // writers; a conditional-create conflict is a duplicate.
            Err(error) if error.is_conflict() => {
                return Ok(Outcome::Rejected(RejectReason::DuplicateId));
            }
            Err(error) => return Err(error),
        };

        let report = self.publisher.publish(&stored).await;
        info!(
            submission_id = %stored.id,
            user = %stored.user,
            fanout_complete = report.all_delivered(),
            "Submission accepted"
        );

        Ok(Outcome::Accepted { id: stored.id })
    }

    async fn process_batch(
        &self,
        drafts: Vec<SubmissionDraft>,
        ctx: ProcessingContext,
    ) -> Result<BatchReport, DomainError> {
        let now = Utc::now().timestamp();

        let mut errors = Vec::new();
        let mut admitted = Vec::new();

        // Admission runs sequentially in input order so that records from
        // the same user within one batch count against each other's quota.
        for (index, draft) in drafts.iter().enumerate() {
            match self.run_admission(draft, now).await? {
                Ok(()) => admitted.push((index, self.build_record(draft, &ctx))),
                Err(reason) => {
                    metrics::counter!("admission_rejections_total", "reason" => reason.code())
                        .increment(1);
                    errors.push(BatchError {
                        index,
                        id: draft.id.clone().map(SubmissionId::new),
                        failure: RecordFailure::Rejected(reason),
                    });
                }
            }
        }

        let mut persisted = Vec::new();
        if !admitted.is_empty() {
            let records: Vec<Submission> =
                admitted.iter().map(|(_, record)| record.clone()).collect();
            let outcomes = self.submissions.create_batch(records).await?;

            // The store reports per item; a refused item must reach the
            // caller, not vanish into a partially applied batch.
            for ((index, record), outcome) in admitted.into_iter().zip(outcomes) {
                match outcome.error {
                    None => persisted.push(record),
                    Some(error) if error.is_conflict() => errors.push(BatchError {
                        index,
                        id: Some(outcome.id),
                        failure: RecordFailure::Rejected(RejectReason::DuplicateId),
                    }),
                    Some(error) => errors.push(BatchError {
                        index,
                        id: Some(outcome.id),
                        failure: RecordFailure::StoreFailed {
                            message: error.to_string(),
                        },
                    }),
                }
            }
        }

        // Fan-out only after the batch write completed, once per record
        // that is actually durable.
        let reports = join_all(
            persisted
                .iter()
                .map(|record| self.publisher.publish(record)),
        )
        .await;

        errors.sort_by_key(|e| e.index);

        let accepted: Vec<SubmissionId> =
            persisted.iter().map(|record| record.id.clone()).collect();

        info!(
            accepted = accepted.len(),
            rejected = errors.len(),
            fanout_complete = reports.iter().all(|r| r.all_delivered()),
            "Batch processed"
        );

        Ok(BatchReport { accepted, errors })
    }

    async fn get(&self, id: &str) -> Result<Option<Submission>, DomainError> {
        validate_submission_id(id)?;
        self.submissions.get(&SubmissionId::new(id)).await
    }

    async fn list(&self) -> Result<Vec<Submission>, DomainError> {
        self.submissions.list().await
    }
}
