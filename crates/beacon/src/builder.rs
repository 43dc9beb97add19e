//! High-level builder wiring the batcher to an HTTP collector

use crate::config::AnalyticsConfig;
use crate::{ActionFilter, BatchPolicy, BatcherState, Delivery, EventBatcher, HttpDelivery};
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// A ready batcher plus the state the host should start from.
pub struct Analytics {
    pub batcher: EventBatcher,
    pub initial_state: BatcherState,
}

/// High-level builder for analytics batching
///
/// # Example
///
/// ```rust,no_run
/// use beacon::prelude::*;
///
/// # fn main() -> Result<()> {
/// let Analytics { batcher, initial_state } = AnalyticsBuilder::new()
///     .endpoint("https://analytics.example.com/batch")
///     .enabled(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct AnalyticsBuilder {
    // Delivery
    endpoint: Option<String>,
    request_timeout: Duration,
    delivery: Option<Arc<dyn Delivery>>,

    // Batching
    filter: ActionFilter,
    policy: BatchPolicy,
    runtime: Option<Handle>,

    // Initial state
    enabled: bool,
    session_id: Option<String>,
}

impl Default for AnalyticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsBuilder {
    /// Create a new builder with the default filter and thresholds
    pub fn new() -> Self {
        Self {
            endpoint: None,
            request_timeout: Duration::from_secs(10),
            delivery: None,
            filter: ActionFilter::default(),
            policy: BatchPolicy::default(),
            runtime: None,
            enabled: true,
            session_id: None,
        }
    }

    /// Builder pre-filled from the `[analytics]` config section
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::new()
            .endpoint(config.endpoint.clone())
            .request_timeout(config.request_timeout())
            .filter(config.filter())
            .policy(config.policy())
            .enabled(config.enabled)
    }

    /// Set the collector endpoint (required unless a custom delivery is given)
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the HTTP request timeout (default: 10s)
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Use a custom delivery instead of HTTP
    pub fn delivery(mut self, delivery: Arc<dyn Delivery>) -> Self {
        self.delivery = Some(delivery);
        self
    }

    pub fn filter(mut self, filter: ActionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Runtime deliveries are spawned on (default: the one current at flush time)
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Whether recording starts enabled (default: true)
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Fixed session id (default: random UUID)
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Build the batcher and its initial state
    pub fn build(self) -> Result<Analytics> {
        let delivery: Arc<dyn Delivery> = match (self.delivery, self.endpoint) {
            (Some(delivery), _) => delivery,
            (None, Some(endpoint)) => Arc::new(
                HttpDelivery::new(endpoint, self.request_timeout)
                    .context("Failed to create HTTP delivery")?,
            ),
            (None, None) => return Err(anyhow!("Analytics endpoint is required")),
        };

        let mut batcher = EventBatcher::builder()
            .delivery(delivery)
            .filter(self.filter)
            .policy(self.policy);
        if let Some(handle) = self.runtime {
            batcher = batcher.runtime(handle);
        }
        let batcher = batcher.build()?;

        let initial_state = match self.session_id {
            Some(session_id) => BatcherState::new(session_id, self.enabled, Utc::now()),
            None => BatcherState::new_session(self.enabled),
        };

        tracing::info!(
            "Analytics batcher ready: session_id={}, enabled={}",
            initial_state.session_id,
            initial_state.is_enabled
        );

        Ok(Analytics {
            batcher,
            initial_state,
        })
    }
}
