//! Application state for shared services

use std::sync::Arc;

use crate::domain::SubmissionRepository;
use crate::infrastructure::services::IngestionServiceTrait;

/// Application state holding the pipeline and its store behind dynamic
/// dispatch, so handlers and tests can swap implementations freely.
#[derive(Clone)]
pub struct AppState {
    pub ingestion_service: Arc<dyn IngestionServiceTrait>,
    pub submissions: Arc<dyn SubmissionRepository>,
    /// Processor identity stamped into accepted records
    pub processor_name: String,
}

impl AppState {
    pub fn new(
        ingestion_service: Arc<dyn IngestionServiceTrait>,
        submissions: Arc<dyn SubmissionRepository>,
        processor_name: impl Into<String>,
    ) -> Self {
        Self {
            ingestion_service,
            submissions,
            processor_name: processor_name.into(),
        }
    }
}
