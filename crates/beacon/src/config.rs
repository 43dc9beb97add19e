use beacon_types::action_types::{DEFAULT_EXCLUDED_ACTIONS, DEFAULT_INCLUDED_ACTIONS};
use beacon_types::{ActionFilter, BatchPolicy};
use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct BeaconConfig {
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Collector URL batches are POSTed to
    pub endpoint: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    /// Transport timeout; the batcher itself never times deliveries out
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_included_actions")]
    pub included_actions: Vec<String>,
    #[serde(default = "default_excluded_actions")]
    pub excluded_actions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_flush_interval_ms() -> u64 {
    5000
}

fn default_max_batch_size() -> usize {
    10
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_included_actions() -> Vec<String> {
    DEFAULT_INCLUDED_ACTIONS.iter().map(|s| s.to_string()).collect()
}

fn default_excluded_actions() -> Vec<String> {
    DEFAULT_EXCLUDED_ACTIONS.iter().map(|s| s.to_string()).collect()
}

impl AnalyticsConfig {
    pub fn filter(&self) -> ActionFilter {
        ActionFilter::new()
            .with_included(self.included_actions.iter().cloned())
            .with_excluded(self.excluded_actions.iter().cloned())
    }

    pub fn policy(&self) -> BatchPolicy {
        BatchPolicy::new()
            .with_flush_interval(Duration::from_millis(self.flush_interval_ms))
            .with_max_batch_size(self.max_batch_size)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl BeaconConfig {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables, e.g. `BEACON_ANALYTICS__ENDPOINT`,
    ///    `BEACON_LOGGING__LEVEL`, `BEACON_ANALYTICS__EXCLUDED_ACTIONS=A,B`
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("BEACON")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("analytics.included_actions")
                    .with_list_parse_key("analytics.excluded_actions"),
            );

        let config = builder.build()?;
        let cfg: BeaconConfig = config.try_deserialize()?;

        if cfg.analytics.endpoint.trim().is_empty() {
            return Err(ConfigError::Message("analytics.endpoint must not be empty".to_string()));
        }

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder()
            .add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }
}
