//! Ingestion outcomes and pure admission checks

mod outcome;
mod validation;

pub use outcome::{
    BatchError, BatchReport, Outcome, ProcessingContext, RecordFailure, RejectReason,
};
pub use validation::{
    ContentPolicy, DEFAULT_PROHIBITED_TERMS, check_required_fields, validate_submission_id,
};
