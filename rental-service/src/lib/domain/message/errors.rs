use thiserror::Error;

use crate::domain::rental::models::RentalId;

/// Error type for MessageContent validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageContentError {
    #[error("Message content is empty")]
    Empty,

    #[error("Message content too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all message-related operations
#[derive(Debug, Clone, Error)]
pub enum MessageError {
    #[error("Invalid message content: {0}")]
    InvalidContent(#[from] MessageContentError),

    #[error("Rental not found: {0}")]
    RentalNotFound(RentalId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for MessageError {
    fn from(err: anyhow::Error) -> Self {
        MessageError::Unknown(err.to_string())
    }
}
