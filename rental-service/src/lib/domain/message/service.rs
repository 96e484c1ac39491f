use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::message::errors::MessageError;
use crate::domain::message::models::Message;
use crate::domain::message::models::NewMessage;
use crate::domain::message::models::SendMessageCommand;
use crate::domain::message::ports::MessageRepository;
use crate::domain::message::ports::MessageServicePort;
use crate::domain::rental::ports::RentalRepository;
use crate::domain::user::models::UserId;

/// Domain service implementation for rental messages.
pub struct MessageService<MR, RR>
where
    MR: MessageRepository,
    RR: RentalRepository,
{
    repository: Arc<MR>,
    rental_repository: Arc<RR>,
}

impl<MR, RR> MessageService<MR, RR>
where
    MR: MessageRepository,
    RR: RentalRepository,
{
    /// # Arguments
    /// * `repository` - Message persistence implementation
    /// * `rental_repository` - Used to check the target rental exists
    pub fn new(repository: Arc<MR>, rental_repository: Arc<RR>) -> Self {
        Self {
            repository,
            rental_repository,
        }
    }
}

#[async_trait]
impl<MR, RR> MessageServicePort for MessageService<MR, RR>
where
    MR: MessageRepository,
    RR: RentalRepository,
{
    async fn send_message(
        &self,
        command: SendMessageCommand,
        sender: UserId,
    ) -> Result<Message, MessageError> {
        let rental_exists = self
            .rental_repository
            .exists(&command.rental_id)
            .await
            .map_err(|e| MessageError::DatabaseError(e.to_string()))?;

        if !rental_exists {
            return Err(MessageError::RentalNotFound(command.rental_id));
        }

        let message = self
            .repository
            .create(NewMessage {
                rental_id: command.rental_id,
                user_id: sender,
                content: command.content,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            message_id = %message.id,
            rental_id = %message.rental_id,
            user_id = %message.user_id,
            "Message sent"
        );

        Ok(message)
    }
}
