use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bearer token payload.
///
/// `iat` and `exp` are RFC 7519 NumericDate values (whole seconds since the
/// Unix epoch). All three fields are required when decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the principal's login key)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for `subject` issued at `issued_at`, valid for `ttl`.
    ///
    /// The expiry is truncated to the whole second, so a token never
    /// outlives the configured time-to-live.
    ///
    /// Returns `None` when the expiry falls outside the representable range.
    pub fn new(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        let expiration = issued_at.checked_add_signed(ttl)?;

        Some(Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Check if the token is expired at `now`.
    ///
    /// A token is still valid at the exact instant of its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() > self.exp.saturating_mul(1000)
    }
}
