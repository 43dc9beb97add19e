//! Common imports for hosts embedding the batcher.

pub use crate::{
    Analytics, AnalyticsBuilder, BeaconConfig,
    ActionFilter, AnalyticEntry, BatchPolicy, BatcherState, Event, EventBatcher, GenericEvent,
    Delivery, HttpDelivery,
};

pub use anyhow::Result;
pub use std::sync::Arc;
