use async_trait::async_trait;

use crate::domain::message::errors::MessageError;
use crate::domain::message::models::Message;
use crate::domain::message::models::NewMessage;
use crate::domain::message::models::SendMessageCommand;
use crate::domain::user::models::UserId;

/// Port for message domain service operations.
#[async_trait]
pub trait MessageServicePort: Send + Sync + 'static {
    /// Post a message on a rental on behalf of `sender`.
    ///
    /// # Errors
    /// * `RentalNotFound` - Target rental does not exist
    /// * `DatabaseError` - Database operation failed
    async fn send_message(
        &self,
        command: SendMessageCommand,
        sender: UserId,
    ) -> Result<Message, MessageError>;
}

/// Persistence operations for messages.
#[async_trait]
pub trait MessageRepository: Send + Sync + 'static {
    /// # Errors
    /// * `RentalNotFound` - Rental was removed before the insert
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, message: NewMessage) -> Result<Message, MessageError>;
}
