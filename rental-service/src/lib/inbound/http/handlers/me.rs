use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::get_user::UserResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Profile of the caller.
pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    state
        .user_service
        .get_user(&principal.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
