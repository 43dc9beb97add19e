use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Collector rejected batch: status={status}, body={body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Failure reported by a non-HTTP `Delivery` implementation
    #[error("Delivery failed: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DeliveryError>;
