//! Credential and authorization primitives
//!
//! Stateless building blocks for password login and bearer tokens:
//! - Password hashing (Argon2id)
//! - Signed, expiring tokens (HS256 JWT)
//! - Login coordination
//! - Ownership check for mutations
//!
//! Nothing here performs I/O. Looking up a principal by login key is the
//! caller's job; the result is handed to [`Authenticator::login`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenService;
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let token = tokens.issue("alice@example.com").unwrap();
//! let claims = tokens.validate(&token).unwrap();
//! assert_eq!(claims.sub, "alice@example.com");
//! ```
//!
//! ## Login
//! ```
//! use auth::{Authenticator, Credentials};
//! use chrono::Duration;
//!
//! struct Account { email: String, hash: String }
//!
//! impl Credentials for Account {
//!     fn login_key(&self) -> &str { &self.email }
//!     fn credential_hash(&self) -> &str { &self.hash }
//! }
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let account = Account {
//!     email: "alice@example.com".to_string(),
//!     hash: auth.hash_password("password123").unwrap(),
//! };
//!
//! let token = auth.login("password123", Some(&account)).unwrap();
//! assert_eq!(auth.validate_token(&token).unwrap().sub, "alice@example.com");
//! ```

pub mod authenticator;
pub mod authorization;
pub mod clock;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::Credentials;
pub use authorization::can_mutate;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
