use axum::extract::rejection::PathRejection;
use axum::extract::Multipart;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::create_rental::RentalForm;
use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::domain::rental::models::RentalId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Update a listing owned by the caller. A `picture` part, if sent, is ignored.
pub async fn update_rental(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    path: Result<Path<i64>, PathRejection>,
    multipart: Multipart,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let Path(rental_id) = path?;

    let command = RentalForm::from_multipart(multipart)
        .await?
        .try_into_update_command()?;

    state
        .rental_service
        .update_rental(&RentalId(rental_id), command, principal.user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageResponseData::new("Rental updated !")))
}
