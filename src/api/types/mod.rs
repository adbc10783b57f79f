//! API wire types

pub mod error;
pub mod json;
pub mod submission;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use submission::{
    BatchErrorBody, ListSubmissionsResponse, SubmitRequest, SubmitResponse,
};
