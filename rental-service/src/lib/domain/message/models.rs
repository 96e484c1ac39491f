use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::message::errors::MessageContentError;
use crate::domain::rental::models::RentalId;
use crate::domain::user::models::UserId;

/// Message left by a user on a rental listing.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub rental_id: RentalId,
    pub user_id: UserId,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Message data before persistence.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub rental_id: RentalId,
    pub user_id: UserId,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub i64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Message content value object with validation.
///
/// Ensures content is non-blank and within the 2000 character limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    const MAX_LENGTH: usize = 2000;

    /// Create validated message content.
    ///
    /// # Errors
    /// * `Empty` - Content is empty or whitespace only
    /// * `TooLong` - Content exceeds 2000 characters
    pub fn new(content: String) -> Result<Self, MessageContentError> {
        if content.trim().is_empty() {
            return Err(MessageContentError::Empty);
        }

        let length = content.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(MessageContentError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to post a message on a rental.
///
/// The sender is not part of the command; it is always the authenticated
/// principal.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub rental_id: RentalId,
    pub content: MessageContent,
}
