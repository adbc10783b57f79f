//! Service layer built on the domain boundaries

mod ingestion_service;

pub use ingestion_service::{IngestionService, IngestionServiceTrait};
