use serde::Deserialize;

use crate::domain::ingestion::DEFAULT_PROHIBITED_TERMS;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub ingestion: IngestionSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Ingestion pipeline settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestionSettings {
    /// Processor identity stamped into accepted records
    pub processor_name: String,
    pub rate_limit: RateLimitSettings,
    /// Terms refused in submission payloads (case-insensitive)
    pub prohibited_terms: Vec<String>,
    pub notifier: NotifierSettings,
}

/// Sliding-window rate limit settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    /// Admissions allowed per user within the window
    pub quota: u32,
    /// Trailing window size in seconds
    pub window_secs: i64,
}

/// Optional webhook notification sink
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifierSettings {
    /// Target URL; no notifier is configured when absent
    pub webhook_url: Option<String>,
    /// HMAC secret for signing notification payloads
    pub secret: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for IngestionSettings {
    fn default() -> Self {
        Self {
            processor_name: "ingest-gateway".to_string(),
            rate_limit: RateLimitSettings::default(),
            prohibited_terms: DEFAULT_PROHIBITED_TERMS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            notifier: NotifierSettings::default(),
        }
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            quota: 3,
            window_secs: 60,
        }
    }
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            webhook_url: None,
            secret: None,
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
