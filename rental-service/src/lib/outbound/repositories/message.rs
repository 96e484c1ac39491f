use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::message::errors::MessageError;
use crate::domain::message::models::Message;
use crate::domain::message::models::MessageContent;
use crate::domain::message::models::MessageId;
use crate::domain::message::models::NewMessage;
use crate::domain::message::ports::MessageRepository;
use crate::domain::rental::models::RentalId;
use crate::domain::user::models::UserId;

pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct MessageRow {
    id: i64,
    rental_id: i64,
    user_id: i64,
    message: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = MessageError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        Ok(Message {
            id: MessageId(row.id),
            rental_id: RentalId(row.rental_id),
            user_id: UserId(row.user_id),
            content: MessageContent::new(row.message)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn create(&self, message: NewMessage) -> Result<Message, MessageError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (rental_id, user_id, message, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, rental_id, user_id, message, created_at, updated_at
            "#,
        )
        .bind(message.rental_id.0)
        .bind(message.user_id.0)
        .bind(message.content.as_str())
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return MessageError::RentalNotFound(message.rental_id);
                }
            }
            tracing::error!(error = %e, "Message insert failed");
            MessageError::DatabaseError(e.to_string())
        })?;

        row.try_into()
    }
}
