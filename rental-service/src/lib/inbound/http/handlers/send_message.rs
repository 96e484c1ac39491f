use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::domain::message::models::MessageContent;
use crate::domain::message::models::SendMessageCommand;
use crate::domain::rental::models::RentalId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn send_message(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let Json(body) = payload?;

    let command = SendMessageCommand {
        rental_id: RentalId(body.rental_id),
        content: MessageContent::new(body.message)
            .map_err(|e| ApiError::BadRequest(format!("Invalid message content: {}", e)))?,
    };

    state
        .message_service
        .send_message(command, principal.user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageResponseData::new("Message send with success"),
            )
        })
}

/// HTTP request body for posting a message.
///
/// A `user_id` field, if present, is ignored: the sender is the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendMessageRequest {
    rental_id: i64,
    message: String,
}
