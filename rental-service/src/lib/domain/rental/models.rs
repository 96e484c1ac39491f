use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::rental::errors::AmountError;
use crate::domain::rental::errors::DescriptionError;
use crate::domain::rental::errors::PictureError;
use crate::domain::rental::errors::RentalNameError;
use crate::domain::user::models::UserId;

/// Rental listing aggregate.
///
/// `owner_id` is set once at creation from the authenticated principal and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Rental {
    pub id: RentalId,
    pub name: RentalName,
    pub surface: Amount,
    pub price: Amount,
    pub picture: Option<String>,
    pub description: Option<Description>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rental data before persistence. The store assigns the identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRental {
    pub name: RentalName,
    pub surface: Amount,
    pub price: Amount,
    pub picture: Option<String>,
    pub description: Option<Description>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RentalId(pub i64);

impl fmt::Display for RentalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Listing title, non-empty and at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalName(String);

impl RentalName {
    const MAX_LENGTH: usize = 255;

    pub fn new(name: String) -> Result<Self, RentalNameError> {
        if name.trim().is_empty() {
            return Err(RentalNameError::Empty);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(RentalNameError::TooLong {
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

/// Non-negative finite quantity (surface in m², monthly price).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    /// # Arguments
    /// * `field` - Field name reported in errors
    /// * `value` - Raw value
    ///
    /// # Errors
    /// * `NotFinite` - NaN or infinite
    /// * `Negative` - Below zero
    pub fn new(field: &'static str, value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite { field });
        }
        if value < 0.0 {
            return Err(AmountError::Negative { field, value });
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Free-text description, at most 2000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    const MAX_LENGTH: usize = 2000;

    pub fn new(description: String) -> Result<Self, DescriptionError> {
        let length = description.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(description))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Uploaded picture file as received from the client.
#[derive(Clone, PartialEq, Eq)]
pub struct PictureUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl PictureUpload {
    /// Longest kept file extension, dot excluded.
    const MAX_EXTENSION_LENGTH: usize = 10;

    /// Check the upload is a non-empty `image/*` file.
    ///
    /// SVG is refused: it can carry scripts and is served from our origin.
    pub fn validate(&self) -> Result<(), PictureError> {
        match self.content_type.as_deref() {
            Some(content_type)
                if content_type.starts_with("image/")
                    && !content_type.starts_with("image/svg") => {}
            other => {
                return Err(PictureError::UnsupportedContentType(
                    other.unwrap_or("none").to_string(),
                ))
            }
        }

        if self.bytes.is_empty() {
            return Err(PictureError::Empty);
        }

        Ok(())
    }

    /// Extension of the original file name, with leading dot, if any.
    ///
    /// Extensions longer than ten characters are dropped.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name.as_deref()?;
        let index = name.rfind('.')?;
        let extension = &name[index..];

        if extension.len() > 1
            && extension.len() <= Self::MAX_EXTENSION_LENGTH + 1
            && extension[1..]
                .chars()
                .all(|c| c.is_ascii_alphanumeric())
        {
            Some(extension)
        } else {
            None
        }
    }
}

impl fmt::Debug for PictureUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PictureUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Command to create a listing with validated fields
#[derive(Debug, Clone)]
pub struct CreateRentalCommand {
    pub name: RentalName,
    pub surface: Amount,
    pub price: Amount,
    pub description: Option<Description>,
}

/// Command to update a listing. The picture cannot be changed.
#[derive(Debug, Clone)]
pub struct UpdateRentalCommand {
    pub name: RentalName,
    pub surface: Amount,
    pub price: Amount,
    pub description: Option<Description>,
}
