//! Submission domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a submission, supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(String);

impl SubmissionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SubmissionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SubmissionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// System-generated metadata attached to a submission at acceptance time.
/// Immutable once set; field names match the persisted item layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionMetadata {
    /// When the submission was accepted
    pub submission_time: DateTime<Utc>,
    /// Where the submission came from (request user agent, if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_source: Option<String>,
    /// Identity of the processor that accepted it
    pub processed_by: String,
}

impl SubmissionMetadata {
    pub fn generate(source: Option<String>, processed_by: impl Into<String>) -> Self {
        Self {
            submission_time: Utc::now(),
            submission_source: source,
            processed_by: processed_by.into(),
        }
    }
}

/// An accepted, durably stored record. There is no update path: once
/// persisted, a submission never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Caller-supplied identifier, unique across the store
    pub id: SubmissionId,
    /// Free-text payload
    pub data: String,
    /// Identity of the submitting user
    pub user: String,
    /// System-generated metadata
    pub metadata: SubmissionMetadata,
}

impl Submission {
    pub fn new(
        id: impl Into<SubmissionId>,
        data: impl Into<String>,
        user: impl Into<String>,
        metadata: SubmissionMetadata,
    ) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
            user: user.into(),
            metadata,
        }
    }
}

/// An unchecked submission as it arrives on the wire. Fields are optional
/// so the admission checks can report exactly which one is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionDraft {
    pub id: Option<String>,
    pub data: Option<String>,
    pub user: Option<String>,
}

impl SubmissionDraft {
    pub fn new(
        id: impl Into<String>,
        data: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            data: Some(data.into()),
            user: Some(user.into()),
        }
    }
}
