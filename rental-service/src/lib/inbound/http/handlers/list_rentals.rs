use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::get_rental::RentalResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_rentals(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ListRentalsResponseData>, ApiError> {
    state
        .rental_service
        .list_rentals()
        .await
        .map_err(ApiError::from)
        .map(|rentals| {
            ApiSuccess::new(
                StatusCode::OK,
                ListRentalsResponseData {
                    rentals: rentals.iter().map(RentalResponseData::from).collect(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRentalsResponseData {
    pub rentals: Vec<RentalResponseData>,
}
