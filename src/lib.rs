//! Ingest Gateway
//!
//! A submission ingestion service: records enter through a request
//! endpoint, pass admission control (field validation, content policy,
//! per-user sliding-window rate limiting, duplicate detection), are
//! durably persisted, and fan out to an event bus, a work queue and an
//! optional notification channel. Fan-out is at-least-once and
//! best-effort per sink; bulk requests report per-record outcomes.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use domain::{ContentPolicy, RateWindowStore, SubmissionRepository};
use infrastructure::fanout::{
    FanoutPublisher, InMemoryEventBus, InMemoryWorkQueue, WebhookNotifier,
};
use infrastructure::rate_limit::{InMemoryRateWindowStore, SlidingWindowLimiter};
use infrastructure::services::IngestionService;
use infrastructure::submission::InMemorySubmissionRepository;

/// Create the application state with all collaborators wired up. Every
/// dependency is constructed here and injected; nothing is process-global,
/// so tests can assemble the same pipeline around doubles.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let submissions: Arc<dyn SubmissionRepository> = Arc::new(InMemorySubmissionRepository::new());
    let rate_store: Arc<dyn RateWindowStore> = Arc::new(InMemoryRateWindowStore::new());

    let limiter = SlidingWindowLimiter::new(
        rate_store,
        config.ingestion.rate_limit.quota,
        config.ingestion.rate_limit.window_secs,
    );
    let policy = ContentPolicy::new(config.ingestion.prohibited_terms.iter().cloned());

    let mut publisher = FanoutPublisher::new(
        Arc::new(InMemoryEventBus::new()),
        Arc::new(InMemoryWorkQueue::new()),
    );

    if let Some(url) = &config.ingestion.notifier.webhook_url {
        let notifier = WebhookNotifier::new(
            url,
            config.ingestion.notifier.secret.clone(),
            config.ingestion.notifier.timeout_secs,
        )?;
        publisher = publisher.with_notifier(Arc::new(notifier));
        info!(url = %url, "Webhook notification sink configured");
    }

    let ingestion_service = Arc::new(IngestionService::new(
        submissions.clone(),
        limiter,
        policy,
        publisher,
    ));

    info!(
        quota = config.ingestion.rate_limit.quota,
        window_secs = config.ingestion.rate_limit.window_secs,
        "Ingestion pipeline initialized"
    );

    Ok(AppState::new(
        ingestion_service,
        submissions,
        config.ingestion.processor_name.clone(),
    ))
}
