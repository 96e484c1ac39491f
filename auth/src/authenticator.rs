use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::jwt::Claims;
use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// A stored principal that can be authenticated with a password.
pub trait Credentials {
    /// Unique login key, used as the token subject.
    fn login_key(&self) -> &str;

    /// Stored credential hash (PHC string).
    fn credential_hash(&self) -> &str;
}

/// Authentication coordinator combining credential verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
    /// Hash verified against when the login key is unknown, so both failure
    /// paths cost one verification.
    dummy_hash: String,
}

const DUMMY_PASSWORD: &str = "unknown-principal-placeholder";

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    /// Unknown login key or wrong password. The two are not distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator with default hashing cost and the system clock.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(token_secret: &[u8], token_ttl: Duration) -> Self {
        Self::with_components(
            PasswordHasher::new(),
            TokenService::new(token_secret, token_ttl),
        )
    }

    /// Create an authenticator from explicitly built parts.
    pub fn with_components(password_hasher: PasswordHasher, token_service: TokenService) -> Self {
        let dummy_hash = password_hasher.hash(DUMMY_PASSWORD).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to prepare placeholder credential hash");
            String::new()
        });

        Self {
            password_hasher,
            token_service,
            dummy_hash,
        }
    }

    /// Create an authenticator reading time from `clock`.
    pub fn with_clock(
        password_hasher: PasswordHasher,
        token_secret: &[u8],
        token_ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_components(
            password_hasher,
            TokenService::with_clock(token_secret, token_ttl, clock),
        )
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored principal and issue a token.
    ///
    /// `principal` is the result of looking up the submitted login key;
    /// `None` means no such principal exists. The password is then checked
    /// against a placeholder hash built with the same cost parameters, so an
    /// unknown login key takes as long as a wrong password.
    ///
    /// # Returns
    /// Signed token whose subject is the principal's login key
    ///
    /// # Errors
    /// * `InvalidCredentials` - Principal unknown or password does not match
    /// * `Token` - Token generation failed
    pub fn login<P: Credentials>(
        &self,
        password: &str,
        principal: Option<&P>,
    ) -> Result<String, AuthenticationError> {
        let Some(principal) = principal else {
            let _ = self.password_hasher.verify(password, &self.dummy_hash);
            return Err(AuthenticationError::InvalidCredentials);
        };

        if !self
            .password_hasher
            .verify(password, principal.credential_hash())
        {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_service.issue(principal.login_key())?)
    }

    /// Issue a token for `subject` without verifying a password.
    ///
    /// Used right after registration, when the credentials were just set.
    pub fn issue_token(&self, subject: &str) -> Result<String, TokenError> {
        self.token_service.issue(subject)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `Malformed`, `InvalidSignature` or `Expired` - see [`TokenService::validate`]
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_service.validate(token)
    }
}
