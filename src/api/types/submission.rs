//! Request and response bodies for the submissions endpoint

use serde::{Deserialize, Serialize};

use crate::domain::{BatchReport, RecordFailure, Submission, SubmissionDraft};

/// POST body: a single submission object, or an array for bulk mode.
/// The flat `{id, data, user}` object shape is the legacy single-record
/// request and still accepted unchanged.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubmitRequest {
    Single(SubmissionDraft),
    Bulk(Vec<SubmissionDraft>),
}

/// One failed record in a bulk response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchErrorBody {
    /// Zero-based position in the submitted array
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Stable reason code (`missing_field`, `prohibited_content`,
    /// `rate_limit_exceeded`, `duplicate_id`, `store_failed`)
    pub reason: String,
    pub error: String,
}

impl BatchErrorBody {
    fn new(index: usize, id: Option<String>, failure: &RecordFailure) -> Self {
        Self {
            index,
            id,
            reason: failure.code().to_string(),
            error: failure.to_string(),
        }
    }
}

/// 200 body for both single and bulk submissions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<BatchErrorBody>>,
}

impl SubmitResponse {
    /// Single-record success body
    pub fn single() -> Self {
        Self {
            message: "Data submitted successfully".to_string(),
            accepted: None,
            errors: None,
        }
    }

    /// Bulk body; `errors` is omitted when every record was accepted
    pub fn bulk(report: &BatchReport, total: usize) -> Self {
        let errors: Vec<BatchErrorBody> = report
            .errors
            .iter()
            .map(|e| {
                BatchErrorBody::new(
                    e.index,
                    e.id.as_ref().map(|id| id.as_str().to_string()),
                    &e.failure,
                )
            })
            .collect();

        Self {
            message: format!("{} of {} records accepted", report.accepted.len(), total),
            accepted: Some(
                report
                    .accepted
                    .iter()
                    .map(|id| id.as_str().to_string())
                    .collect(),
            ),
            errors: (!errors.is_empty()).then_some(errors),
        }
    }
}

/// GET body for the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSubmissionsResponse {
    pub submissions: Vec<Submission>,
    pub count: usize,
}

impl ListSubmissionsResponse {
    pub fn new(submissions: Vec<Submission>) -> Self {
        let count = submissions.len();
        Self { submissions, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BatchError, RejectReason, SubmissionId};

    #[test]
    fn test_single_object_body_parses_as_single() {
        let request: SubmitRequest =
            serde_json::from_str(r#"{"id": "sub-1", "data": "payload", "user": "alice"}"#).unwrap();
        assert!(matches!(request, SubmitRequest::Single(_)));
    }

    #[test]
    fn test_array_body_parses_as_bulk() {
        let request: SubmitRequest =
            serde_json::from_str(r#"[{"id": "a", "data": "x", "user": "u"}, {"id": "b"}]"#)
                .unwrap();
        match request {
            SubmitRequest::Bulk(drafts) => assert_eq!(drafts.len(), 2),
            SubmitRequest::Single(_) => panic!("array body must parse as bulk"),
        }
    }

    #[test]
    fn test_clean_bulk_response_omits_errors() {
        let report = BatchReport {
            accepted: vec![SubmissionId::new("a")],
            errors: vec![],
        };
        let body = SubmitResponse::bulk(&report, 1);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "1 of 1 records accepted");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_bulk_response_reports_reason_codes() {
        let report = BatchReport {
            accepted: vec![],
            errors: vec![BatchError {
                index: 2,
                id: Some(SubmissionId::new("dup")),
                failure: RecordFailure::Rejected(RejectReason::DuplicateId),
            }],
        };
        let body = SubmitResponse::bulk(&report, 1);

        let errors = body.errors.unwrap();
        assert_eq!(errors[0].index, 2);
        assert_eq!(errors[0].id.as_deref(), Some("dup"));
        assert_eq!(errors[0].reason, "duplicate_id");
    }
}
