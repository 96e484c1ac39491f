use thiserror::Error;

use crate::domain::rental::models::RentalId;
use crate::domain::user::models::UserId;

/// Error for RentalName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RentalNameError {
    #[error("Rental name is empty")]
    Empty,

    #[error("Rental name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for surface and price validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AmountError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

/// Error for Description validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("Description too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for rejected picture uploads
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PictureError {
    #[error("Picture file is empty")]
    Empty,

    #[error("Picture must be an image, got content type {0}")]
    UnsupportedContentType(String),
}

/// Top-level error for all rental-related operations
#[derive(Debug, Clone, Error)]
pub enum RentalError {
    #[error("Invalid name: {0}")]
    InvalidName(#[from] RentalNameError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("Invalid description: {0}")]
    InvalidDescription(#[from] DescriptionError),

    #[error("Invalid picture: {0}")]
    InvalidPicture(#[from] PictureError),

    // Domain-level errors
    #[error("Rental not found: {0}")]
    NotFound(RentalId),

    #[error("User {user_id} is not the owner of rental {rental_id}")]
    Forbidden { user_id: UserId, rental_id: RentalId },

    // Infrastructure errors
    #[error("Picture storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for RentalError {
    fn from(err: anyhow::Error) -> Self {
        RentalError::Unknown(err.to_string())
    }
}
