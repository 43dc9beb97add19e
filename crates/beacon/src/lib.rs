//! # Beacon
//!
//! Client-side analytics batching for applications with a single-threaded,
//! state-container style event loop.
//!
//! ## Overview
//!
//! The host keeps a [`BatcherState`] and runs every dispatched event through
//! [`EventBatcher::apply`]. The batcher:
//!
//! - **Filters** events by an allowlist/denylist and a master enable flag
//! - **Buffers** accepted events as plain-JSON [`AnalyticEntry`] values
//! - **Flushes** when the batch reaches 10 entries or 5 seconds have passed
//!   since the last send
//! - **Delivers** fire-and-forget: one POST per batch, no retry
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use beacon::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let Analytics { batcher, initial_state } = AnalyticsBuilder::new()
//!         .endpoint("https://analytics.example.com/batch")
//!         .build()?;
//!
//!     let state = batcher.apply(
//!         initial_state,
//!         GenericEvent::new("SELECT_LAYER").with_field("layerId", "sst").into(),
//!     );
//!     let _state = batcher.apply(state, Event::set_analytics_enabled(false));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`beacon-types`**: events, state, filter and flush policy types
//! - **`beacon-delivery`**: delivery trait and HTTP implementation
//! - **`beacon-batcher`**: the batching state machine
//!
//! ## License
//!
//! MIT

pub mod builder;
pub mod config;
pub mod logging;
pub mod prelude;

pub use builder::{Analytics, AnalyticsBuilder};
pub use config::{AnalyticsConfig, BeaconConfig, LoggingConfig};
pub use logging::init_logging;

pub use beacon_types::{
    action_types, ActionFilter, ActionType, AnalyticEntry, BatchPolicy, BatcherState, Event,
    EventError, FieldValue, GenericEvent, ToPlain,
};

pub use beacon_delivery::{Delivery, DeliveryError, HttpDelivery};

pub use beacon_batcher::{Clock, EventBatcher, EventBatcherBuilder, ManualClock, SystemClock};
