//! v1 API endpoints

pub mod submissions;

use axum::{
    Router,
    routing::{get, post},
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            "/submissions",
            post(submissions::submit).get(submissions::list_submissions),
        )
        .route("/submissions/{id}", get(submissions::get_submission))
}
