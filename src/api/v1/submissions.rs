//! Submissions endpoint handlers

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header::USER_AGENT},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, Json, ListSubmissionsResponse, SubmitRequest, SubmitResponse,
};
use crate::domain::{Outcome, ProcessingContext, Submission};

fn context_from(headers: &HeaderMap, state: &AppState) -> ProcessingContext {
    let source = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    ProcessingContext::new(source, state.processor_name.clone())
}

/// POST /v1/submissions
///
/// A JSON object runs the single path; a JSON array runs the bulk path.
/// Bulk responses are 200 with per-record errors; single rejections map to
/// their own status codes.
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let ctx = context_from(&headers, &state);

    match request {
        SubmitRequest::Single(draft) => {
            debug!(id = ?draft.id, "Processing single submission");
            let outcome = state
                .ingestion_service
                .process_single(draft, ctx)
                .await
                .map_err(ApiError::from)?;

            match outcome {
                Outcome::Accepted { .. } => Ok(Json(SubmitResponse::single())),
                Outcome::Rejected(reason) => Err(ApiError::from_rejection(&reason)),
            }
        }
        SubmitRequest::Bulk(drafts) => {
            debug!(count = drafts.len(), "Processing bulk submission");
            let total = drafts.len();
            let report = state
                .ingestion_service
                .process_batch(drafts, ctx)
                .await
                .map_err(ApiError::from)?;

            Ok(Json(SubmitResponse::bulk(&report, total)))
        }
    }
}

/// GET /v1/submissions/{id}
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Submission>, ApiError> {
    debug!(id = %id, "Fetching submission");

    state
        .ingestion_service
        .get(&id)
        .await
        .map_err(ApiError::from)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Submission '{}' not found", id)))
}

/// GET /v1/submissions
pub async fn list_submissions(
    State(state): State<AppState>,
) -> Result<Json<ListSubmissionsResponse>, ApiError> {
    debug!("Listing all submissions");

    let submissions = state
        .ingestion_service
        .list()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListSubmissionsResponse::new(submissions)))
}
