use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

use crate::delivery::Delivery;
use crate::error::{DeliveryError, Result};

/// HTTP delivery to the analytics collection endpoint
///
/// Each batch is a single `POST <endpoint>` with the JSON payload as body.
/// The request timeout is the only bound on how long a delivery runs.
#[derive(Debug, Clone)]
pub struct HttpDelivery {
    client: Client,
    endpoint: String,
}

impl HttpDelivery {
    /// Create a new HTTP delivery
    ///
    /// # Arguments
    /// * `endpoint` - Collector URL (e.g., "https://analytics.example.com/batch")
    /// * `timeout` - Per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(DeliveryError::InvalidEndpoint(endpoint));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            tracing::debug!("Analytics collector accepted batch: {}", status);
            Ok(())
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());

            Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl Delivery for HttpDelivery {
    async fn deliver(&self, payload: String) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
