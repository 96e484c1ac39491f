use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Signing algorithm. Fixed; never taken from a token header.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Issues and validates signed, time-bounded bearer tokens.
///
/// Tokens are self-contained HS256 JWTs; validating one needs nothing but the
/// process-wide secret. Nothing is stored server-side, so there is no way to
/// revoke a single token. Rotating the secret invalidates all of them.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a token service using the system clock.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret (at least 32 bytes recommended)
    /// * `ttl` - Lifetime of issued tokens
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self::with_clock(secret, ttl, Arc::new(SystemClock))
    }

    /// Create a token service reading time from `clock`.
    pub fn with_clock(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against `clock` after decoding.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = ["sub", "exp"].iter().map(|c| c.to_string()).collect();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }

    /// Lifetime of issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, valid from now for the configured ttl.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry out of range, or token encoding failed
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let claims = Claims::new(subject, self.clock.now(), self.ttl)
            .ok_or_else(|| TokenError::EncodingFailed("expiry out of range".to_string()))?;

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return its claims.
    ///
    /// Checks run in this order and stop at the first failure:
    /// 1. shape: three non-empty dot-separated segments (`Malformed`)
    /// 2. signature over header and payload with our secret (`InvalidSignature`)
    /// 3. claims decoding (`Malformed`)
    /// 4. expiry against the clock, without leeway (`Expired`)
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        if !has_compact_shape(token) {
            return Err(TokenError::Malformed);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if claims.is_expired(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

fn has_compact_shape(token: &str) -> bool {
    let mut segments = 0;
    for segment in token.split('.') {
        if segment.is_empty() {
            return false;
        }
        segments += 1;
    }
    segments == 3
}
