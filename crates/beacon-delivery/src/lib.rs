pub mod delivery;
pub mod error;

#[cfg(feature = "http")]
pub mod http;

// Re-export main types
pub use delivery::Delivery;
pub use error::{DeliveryError, Result};

#[cfg(feature = "http")]
pub use http::HttpDelivery;
