use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::register::TokenResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;

    let command = LoginCommand {
        email: body.email,
        password: body.password,
    };

    state
        .user_service
        .login(command)
        .await
        .map_err(|e| match e {
            UserError::InvalidCredentials => ApiError::Unauthorized("error".to_string()),
            _ => ApiError::from(e),
        })
        .map(|token| ApiSuccess::new(StatusCode::OK, TokenResponseData { token }))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
