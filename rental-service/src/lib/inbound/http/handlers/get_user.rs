use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::serialize_date;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let Path(user_id) = path?;

    state
        .user_service
        .get_user(&UserId(user_id))
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// Public view of an account. Never carries the credential hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponseData {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "serialize_date")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_date")]
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
