use auth::AuthenticationError;
use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

use crate::domain::user::models::UserId;

/// Error for UserName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserNameError {
    #[error("Name is empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),

    #[error("Email too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid name: {0}")]
    InvalidName(#[from] UserNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("User not found with email: {0}")]
    NotFoundByEmail(String),

    #[error("Email already registered: {0}")]
    DuplicateIdentifier(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Credential infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<AuthenticationError> for UserError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            AuthenticationError::Password(e) => UserError::Password(e),
            AuthenticationError::Token(e) => UserError::Token(e),
        }
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}
