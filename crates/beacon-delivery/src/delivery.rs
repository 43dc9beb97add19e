use async_trait::async_trait;

use crate::error::Result;

/// Sink for serialized analytics batches.
///
/// Implementations are driven from a detached task: the caller never waits on
/// the result and never retries. An `Err` only ends up in the logs.
#[async_trait]
pub trait Delivery: Send + Sync {
    /// Deliver one batch
    ///
    /// # Arguments
    /// * `payload` - JSON array of analytic entries
    async fn deliver(&self, payload: String) -> Result<()>;
}
