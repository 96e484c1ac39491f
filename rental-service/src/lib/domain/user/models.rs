use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::UserNameError;

/// User aggregate entity.
///
/// Represents a registered account. The email is the login key.
#[derive(Clone)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl auth::Credentials for User {
    fn login_key(&self) -> &str {
        self.email.as_str()
    }

    fn credential_hash(&self) -> &str {
        &self.password_hash
    }
}

/// User data before persistence. The store assigns the identifier.
#[derive(Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Non-empty, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name longer than 255 characters
    pub fn new(name: String) -> Result<Self, UserNameError> {
        if name.trim().is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(UserNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 255;

    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    /// * `TooLong` - Email longer than 255 characters
    pub fn new(email: String) -> Result<Self, EmailError> {
        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password submitted at registration.
///
/// Never printed; `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// # Errors
    /// * `TooShort` - Password shorter than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }

        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to register a new account with validated fields
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: UserName,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(name: UserName, email: EmailAddress, password: Password) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Login attempt as submitted.
///
/// Left unvalidated: a malformed email is just another unknown login key.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
