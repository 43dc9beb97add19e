use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventError {
    #[error("Event is not a JSON object")]
    NotAnObject,

    #[error("Event is missing a string `type` field")]
    MissingType,

    #[error("Control event {0} requires a boolean `isEnabled` field")]
    InvalidControlFlag(String),
}

pub type Result<T> = std::result::Result<T, EventError>;
