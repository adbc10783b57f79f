//! Per-record pipeline outcomes and bulk report types

use serde::Serialize;

use crate::domain::submission::SubmissionId;

/// Why a record was refused admission. These are expected, user-facing
/// outcomes, never system errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// A required field (`id`, `data` or `user`) is absent or empty
    MissingField(&'static str),
    /// The payload contains a denylisted term
    ProhibitedContent { term: String },
    /// The user is over their admission quota for the trailing window
    RateLimitExceeded,
    /// A record with this id is already stored
    DuplicateId,
}

impl RejectReason {
    /// Stable machine-readable code reported per record
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::ProhibitedContent { .. } => "prohibited_content",
            Self::RateLimitExceeded => "rate_limit_exceeded",
            Self::DuplicateId => "duplicate_id",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => {
                write!(f, "Missing required field '{}' (id, data, user)", field)
            }
            Self::ProhibitedContent { term } => {
                write!(f, "Submission contains prohibited content: '{}'", term)
            }
            Self::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            Self::DuplicateId => write!(f, "ID already exists"),
        }
    }
}

/// Result of running one record through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted { id: SubmissionId },
    Rejected(RejectReason),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// How a single record in a batch failed: refused admission, or admitted
/// but refused by the store during the batch write.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordFailure {
    Rejected(RejectReason),
    StoreFailed { message: String },
}

impl RecordFailure {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Rejected(reason) => reason.code(),
            Self::StoreFailed { .. } => "store_failed",
        }
    }
}

impl std::fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(reason) => reason.fmt(f),
            Self::StoreFailed { message } => write!(f, "Storage refused record: {}", message),
        }
    }
}

/// One failed record in a bulk request, keyed by its position in the input
/// (ids may be absent on validation failures).
#[derive(Debug, Clone, PartialEq)]
pub struct BatchError {
    /// Zero-based position in the submitted batch
    pub index: usize,
    /// The record's id, when it had one
    pub id: Option<SubmissionId>,
    pub failure: RecordFailure,
}

/// Aggregate result of a bulk request. Records are processed independently;
/// failures never abort the rest of the batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Ids persisted and fanned out, in input order
    pub accepted: Vec<SubmissionId>,
    /// Per-record failures, in input order
    pub errors: Vec<BatchError>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Request-scoped context stamped into generated metadata
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingContext {
    /// Caller-reported origin (request user agent, if any)
    pub source: Option<String>,
    /// Identity of this processor instance
    pub processor: String,
}

impl ProcessingContext {
    pub fn new(source: Option<String>, processor: impl Into<String>) -> Self {
        Self {
            source,
            processor: processor.into(),
        }
    }
}
