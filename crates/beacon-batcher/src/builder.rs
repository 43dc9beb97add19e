use std::sync::Arc;
use anyhow::{Result, anyhow};
use tokio::runtime::Handle;

use beacon_delivery::Delivery;
use beacon_types::{ActionFilter, BatchPolicy};

use crate::batcher::EventBatcher;
use crate::clock::{Clock, SystemClock};

/// Builder for constructing an EventBatcher
pub struct EventBatcherBuilder {
    delivery: Option<Arc<dyn Delivery>>,
    filter: ActionFilter,
    policy: BatchPolicy,
    clock: Arc<dyn Clock>,
    runtime: Option<Handle>,
}

impl EventBatcherBuilder {
    pub fn new() -> Self {
        Self {
            delivery: None,
            filter: ActionFilter::default(),
            policy: BatchPolicy::default(),
            clock: Arc::new(SystemClock),
            runtime: None,
        }
    }

    /// Set the delivery collaborator (required)
    pub fn delivery(mut self, delivery: Arc<dyn Delivery>) -> Self {
        self.delivery = Some(delivery);
        self
    }

    /// Set the action filter (default: the built-in denylist)
    pub fn filter(mut self, filter: ActionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the flush thresholds (default: 5s / 10 entries)
    pub fn policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Runtime to spawn deliveries on.
    ///
    /// Without one, the runtime current at flush time is used.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Build the EventBatcher
    pub fn build(self) -> Result<EventBatcher> {
        let delivery = self.delivery
            .ok_or_else(|| anyhow!("Delivery is required"))?;
        if self.policy.max_batch_size == 0 {
            return Err(anyhow!("max_batch_size must be at least 1"));
        }

        Ok(EventBatcher::new(
            delivery,
            self.filter,
            self.policy,
            self.clock,
            self.runtime,
        ))
    }
}

impl Default for EventBatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
