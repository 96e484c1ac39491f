use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::domain::rental::errors::AmountError;
use crate::domain::rental::errors::DescriptionError;
use crate::domain::rental::errors::RentalNameError;
use crate::domain::rental::models::Amount;
use crate::domain::rental::models::CreateRentalCommand;
use crate::domain::rental::models::Description;
use crate::domain::rental::models::PictureUpload;
use crate::domain::rental::models::RentalName;
use crate::domain::rental::models::UpdateRentalCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_rental(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let mut form = RentalForm::from_multipart(multipart).await?;
    let picture = form.picture.take();

    state
        .rental_service
        .create_rental(form.try_into_create_command()?, principal.user_id, picture)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageResponseData::new("Rental created !")))
}

/// Multipart form shared by rental creation and update.
///
/// Fields: `name`, `surface`, `price`, optional `description`, optional
/// `picture` file. Unknown fields are ignored; any `owner_id` sent by the
/// client is one of them.
#[derive(Debug, Default)]
pub(super) struct RentalForm {
    name: Option<String>,
    surface: Option<String>,
    price: Option<String>,
    description: Option<String>,
    pub(super) picture: Option<PictureUpload>,
}

#[derive(Debug, Clone, Error)]
pub(super) enum ParseRentalFormError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("{0} must be a number")]
    NotANumber(&'static str),

    #[error("Invalid name: {0}")]
    Name(#[from] RentalNameError),

    #[error("Invalid amount: {0}")]
    Amount(#[from] AmountError),

    #[error("Invalid description: {0}")]
    Description(#[from] DescriptionError),
}

impl From<ParseRentalFormError> for ApiError {
    fn from(err: ParseRentalFormError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

fn malformed(e: MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Malformed multipart body: {}", e))
}

impl RentalForm {
    pub(super) async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = RentalForm::default();

        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            match field.name() {
                Some("name") => form.name = Some(field.text().await.map_err(malformed)?),
                Some("surface") => form.surface = Some(field.text().await.map_err(malformed)?),
                Some("price") => form.price = Some(field.text().await.map_err(malformed)?),
                Some("description") => {
                    form.description = Some(field.text().await.map_err(malformed)?)
                }
                Some("picture") => {
                    let file_name = field
                        .file_name()
                        .filter(|name| !name.is_empty())
                        .map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(malformed)?;

                    // Browsers send an empty part when no file was chosen.
                    if file_name.is_some() || !bytes.is_empty() {
                        form.picture = Some(PictureUpload {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                _ => continue,
            }
        }

        Ok(form)
    }

    fn parts(
        self,
    ) -> Result<(RentalName, Amount, Amount, Option<Description>), ParseRentalFormError> {
        let name = RentalName::new(self.name.ok_or(ParseRentalFormError::MissingField("name"))?)?;
        let surface = parse_amount("surface", self.surface)?;
        let price = parse_amount("price", self.price)?;
        let description = self
            .description
            .filter(|description| !description.trim().is_empty())
            .map(Description::new)
            .transpose()?;

        Ok((name, surface, price, description))
    }

    pub(super) fn try_into_create_command(
        self,
    ) -> Result<CreateRentalCommand, ParseRentalFormError> {
        let (name, surface, price, description) = self.parts()?;
        Ok(CreateRentalCommand {
            name,
            surface,
            price,
            description,
        })
    }

    pub(super) fn try_into_update_command(
        self,
    ) -> Result<UpdateRentalCommand, ParseRentalFormError> {
        let (name, surface, price, description) = self.parts()?;
        Ok(UpdateRentalCommand {
            name,
            surface,
            price,
            description,
        })
    }
}

fn parse_amount(field: &'static str, raw: Option<String>) -> Result<Amount, ParseRentalFormError> {
    let raw = raw.ok_or(ParseRentalFormError::MissingField(field))?;
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseRentalFormError::NotANumber(field))?;

    Ok(Amount::new(field, value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, surface: &str, price: &str) -> RentalForm {
        RentalForm {
            name: Some(name.to_string()),
            surface: Some(surface.to_string()),
            price: Some(price.to_string()),
            description: None,
            picture: None,
        }
    }

    #[test]
    fn test_parse_valid_form() {
        let command = form("Loft", "65.5", " 850 ").try_into_create_command().unwrap();

        assert_eq!(command.name.as_str(), "Loft");
        assert_eq!(command.surface.value(), 65.5);
        assert_eq!(command.price.value(), 850.0);
        assert!(command.description.is_none());
    }

    #[test]
    fn test_parse_blank_description_as_none() {
        let mut form = form("Loft", "65.5", "850");
        form.description = Some("   ".to_string());

        let command = form.try_into_update_command().unwrap();
        assert!(command.description.is_none());
    }

    #[test]
    fn test_parse_rejects_missing_and_invalid_fields() {
        let mut missing = form("Loft", "65.5", "850");
        missing.price = None;
        assert!(matches!(
            missing.try_into_create_command(),
            Err(ParseRentalFormError::MissingField("price"))
        ));

        assert!(matches!(
            form("Loft", "big", "850").try_into_create_command(),
            Err(ParseRentalFormError::NotANumber("surface"))
        ));
        assert!(matches!(
            form("Loft", "65.5", "-3").try_into_create_command(),
            Err(ParseRentalFormError::Amount(_))
        ));
        assert!(matches!(
            form("", "65.5", "850").try_into_create_command(),
            Err(ParseRentalFormError::Name(_))
        ));
    }
}
