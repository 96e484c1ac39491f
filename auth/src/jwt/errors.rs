use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Error type for token issuance and validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            // A header naming any algorithm other than ours is treated as a forged signature.
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}
