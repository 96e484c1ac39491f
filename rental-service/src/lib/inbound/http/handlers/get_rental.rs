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
use crate::domain::rental::models::Rental;
use crate::domain::rental::models::RentalId;
use crate::inbound::http::router::AppState;

pub async fn get_rental(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<RentalResponseData>, ApiError> {
    let Path(rental_id) = path?;

    state
        .rental_service
        .get_rental(&RentalId(rental_id))
        .await
        .map_err(ApiError::from)
        .map(|ref rental| ApiSuccess::new(StatusCode::OK, rental.into()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalResponseData {
    pub id: i64,
    pub name: String,
    pub surface: f64,
    pub price: f64,
    pub picture: Option<String>,
    pub description: Option<String>,
    pub owner_id: i64,
    #[serde(serialize_with = "serialize_date")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_date")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Rental> for RentalResponseData {
    fn from(rental: &Rental) -> Self {
        Self {
            id: rental.id.0,
            name: rental.name.as_str().to_string(),
            surface: rental.surface.value(),
            price: rental.price.value(),
            picture: rental.picture.clone(),
            description: rental
                .description
                .as_ref()
                .map(|description| description.as_str().to_string()),
            owner_id: rental.owner_id.0,
            created_at: rental.created_at,
            updated_at: rental.updated_at,
        }
    }
}
