use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde::Serializer;

use crate::domain::message::errors::MessageError;
use crate::domain::rental::errors::RentalError;
use crate::domain::user::errors::UserError;

pub mod create_rental;
pub mod get_rental;
pub mod get_user;
pub mod list_rentals;
pub mod login;
pub mod me;
pub mod register;
pub mod send_message;
pub mod update_rental;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(MessageResponseData { message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByEmail(_) => {
                ApiError::NotFound(err.to_string())
            }
            UserError::DuplicateIdentifier(_)
            | UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_) => ApiError::BadRequest(err.to_string()),
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<RentalError> for ApiError {
    fn from(err: RentalError) -> Self {
        match err {
            RentalError::NotFound(_) => ApiError::NotFound(err.to_string()),
            RentalError::Forbidden { .. } => ApiError::Forbidden(err.to_string()),
            RentalError::InvalidName(_)
            | RentalError::InvalidAmount(_)
            | RentalError::InvalidDescription(_)
            | RentalError::InvalidPicture(_) => ApiError::BadRequest(err.to_string()),
            RentalError::Storage(_) | RentalError::DatabaseError(_) | RentalError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<MessageError> for ApiError {
    fn from(err: MessageError) -> Self {
        match err {
            MessageError::InvalidContent(_) | MessageError::RentalNotFound(_) => {
                ApiError::BadRequest(err.to_string())
            }
            MessageError::DatabaseError(_) | MessageError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

/// `{"message": ...}` body shared by confirmations and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponseData {
    pub message: String,
}

impl MessageResponseData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Render a timestamp as `yyyy/MM/dd`.
pub fn serialize_date<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format("%Y/%m/%d"))
}
