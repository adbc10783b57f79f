//! HTTP webhook notification sink
//!
//! Posts the notification as JSON to a configured URL. When a secret is
//! configured, the body is signed with HMAC-SHA256 and the signature sent
//! as `X-Notification-Signature` so receivers can verify origin.

use std::time::Duration;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::Sha256;
use tracing::debug;

use crate::domain::{DomainError, Notification, Notifier};

type HmacSha256 = Hmac<Sha256>;

/// Webhook-backed Notifier implementation
pub struct WebhookNotifier {
    client: Client,
    url: String,
    secret: Option<String>,
}

impl WebhookNotifier {
    /// Creates a notifier posting to `url` with the given request timeout
    pub fn new(
        url: impl Into<String>,
        secret: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            url: url.into(),
            secret,
        })
    }

    /// HMAC-SHA256 signature over the serialized payload
    fn sign(secret: &str, payload: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), DomainError> {
        let payload = serde_json::to_string(&notification)
            .map_err(|e| DomainError::internal(format!("Failed to serialize payload: {}", e)))?;

        let mut request = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json");

        if let Some(ref secret) = self.secret {
            let signature = Self::sign(secret, &payload);
            request = request.header("X-Notification-Signature", format!("sha256={}", signature));
        }

        let response = request.body(payload).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "Request timed out".to_string()
            } else if e.is_connect() {
                "Connection failed".to_string()
            } else {
                format!("Request failed: {}", e)
            };
            DomainError::sink("notifier", message)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::sink(
                "notifier",
                format!("HTTP status {}", status.as_u16()),
            ));
        }

        debug!(
            submission_id = %notification.submission_id,
            status = status.as_u16(),
            "Notification delivered"
        );
        Ok(())
    }
}
