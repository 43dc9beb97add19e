pub mod batcher;
pub mod builder;
pub mod clock;

pub use batcher::EventBatcher;
pub use builder::EventBatcherBuilder;
pub use clock::{Clock, ManualClock, SystemClock};

// Re-export key types from beacon-types
pub use beacon_types::{
    ActionFilter, AnalyticEntry, BatchPolicy, BatcherState, Event, GenericEvent,
};
