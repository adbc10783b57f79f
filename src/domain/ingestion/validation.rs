//! Admission checks that need no I/O

use serde::Deserialize;

use crate::domain::error::DomainError;
use crate::domain::submission::SubmissionDraft;

use super::outcome::RejectReason;

/// Terms refused in submission payloads when no list is configured
pub const DEFAULT_PROHIBITED_TERMS: &[&str] = &["spam", "fraud", "malicious"];

/// Longest id the store accepts as a key
const MAX_ID_LEN: usize = 255;

/// Checks that `id`, `data` and `user` are all present and non-empty,
/// reporting the first one that is not.
pub fn check_required_fields(draft: &SubmissionDraft) -> Result<(), RejectReason> {
    for (field, value) in [
        ("id", &draft.id),
        ("data", &draft.data),
        ("user", &draft.user),
    ] {
        match value {
            Some(v) if !v.trim().is_empty() => {}
            _ => return Err(RejectReason::MissingField(field)),
        }
    }
    Ok(())
}

/// Validates the id format beyond presence. Oversized ids are a caller
/// error rather than an admission outcome.
pub fn validate_submission_id(id: &str) -> Result<(), DomainError> {
    if id.len() > MAX_ID_LEN {
        return Err(DomainError::validation(format!(
            "Submission id cannot exceed {} characters",
            MAX_ID_LEN
        )));
    }
    Ok(())
}

/// Content-policy check against a configured denylist. Pure, no I/O; the
/// list is injected configuration, not embedded logic.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentPolicy {
    prohibited_terms: Vec<String>,
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PROHIBITED_TERMS.iter().map(|t| t.to_string()))
    }
}

impl ContentPolicy {
    /// Builds a policy, lowercasing terms so matching is case-insensitive
    pub fn new(terms: impl IntoIterator<Item = String>) -> Self {
        Self {
            prohibited_terms: terms
                .into_iter()
                .map(|t| t.to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Returns the first denylisted term found in the payload, if any
    /// (case-insensitive substring match)
    pub fn find_prohibited(&self, data: &str) -> Option<&str> {
        let lowered = data.to_lowercase();
        self.prohibited_terms
            .iter()
            .find(|term| lowered.contains(term.as_str()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_present() {
        let draft = SubmissionDraft::new("sub-1", "payload", "alice");
        assert!(check_required_fields(&draft).is_ok());
    }

    #[test]
    fn test_missing_each_field() {
        let missing_id = SubmissionDraft {
            id: None,
            data: Some("payload".to_string()),
            user: Some("alice".to_string()),
        };
        assert_eq!(
            check_required_fields(&missing_id),
            Err(RejectReason::MissingField("id"))
        );

        let missing_data = SubmissionDraft {
            id: Some("sub-1".to_string()),
            data: None,
            user: Some("alice".to_string()),
        };
        assert_eq!(
            check_required_fields(&missing_data),
            Err(RejectReason::MissingField("data"))
        );

        let missing_user = SubmissionDraft {
            id: Some("sub-1".to_string()),
            data: Some("payload".to_string()),
            user: None,
        };
        assert_eq!(
            check_required_fields(&missing_user),
            Err(RejectReason::MissingField("user"))
        );
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let draft = SubmissionDraft::new("  ", "payload", "alice");
        assert_eq!(
            check_required_fields(&draft),
            Err(RejectReason::MissingField("id"))
        );
    }

    #[test]
    fn test_id_length_cap() {
        assert!(validate_submission_id("sub-1").is_ok());
        assert!(validate_submission_id(&"x".repeat(256)).is_err());
    }

    #[test]
    fn test_default_policy_matches_case_insensitively() {
        let policy = ContentPolicy::default();
        assert_eq!(policy.find_prohibited("this is SPAM content"), Some("spam"));
        assert_eq!(policy.find_prohibited("Fraudulent offer"), Some("fraud"));
        assert!(policy.find_prohibited("perfectly fine text").is_none());
    }

    #[test]
    fn test_custom_policy() {
        let policy = ContentPolicy::new(vec!["Banned".to_string()]);
        assert_eq!(policy.find_prohibited("totally banned words"), Some("banned"));
        assert!(policy.find_prohibited("spam is fine here").is_none());
    }

    #[test]
    fn test_empty_terms_are_dropped() {
        let policy = ContentPolicy::new(vec!["".to_string()]);
        assert!(policy.find_prohibited("anything").is_none());
    }
}
