use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::UserNameError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::UserName;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|(_, token)| ApiSuccess::new(StatusCode::OK, TokenResponseData { token }))
}

/// HTTP request body for registration (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] UserNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let name = UserName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(RegisterCommand::new(name, email, password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub token: String,
}
