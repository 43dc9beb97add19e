pub mod action_types;
pub mod config;
pub mod error;
pub mod events;
pub mod state;

pub use config::{ActionFilter, BatchPolicy};
pub use error::EventError;
pub use events::{ActionType, Event, FieldValue, GenericEvent, ToPlain};
pub use state::{AnalyticEntry, BatcherState};
