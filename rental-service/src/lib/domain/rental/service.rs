use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::rental::errors::RentalError;
use crate::domain::rental::models::CreateRentalCommand;
use crate::domain::rental::models::NewRental;
use crate::domain::rental::models::PictureUpload;
use crate::domain::rental::models::Rental;
use crate::domain::rental::models::RentalId;
use crate::domain::rental::models::UpdateRentalCommand;
use crate::domain::rental::ports::PictureStorage;
use crate::domain::rental::ports::RentalRepository;
use crate::domain::rental::ports::RentalServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for rental listings.
pub struct RentalService<RR, PS>
where
    RR: RentalRepository,
    PS: PictureStorage,
{
    repository: Arc<RR>,
    picture_storage: Arc<PS>,
}

impl<RR, PS> RentalService<RR, PS>
where
    RR: RentalRepository,
    PS: PictureStorage,
{
    pub fn new(repository: Arc<RR>, picture_storage: Arc<PS>) -> Self {
        Self {
            repository,
            picture_storage,
        }
    }
}

#[async_trait]
impl<RR, PS> RentalServicePort for RentalService<RR, PS>
where
    RR: RentalRepository,
    PS: PictureStorage,
{
    async fn list_rentals(&self) -> Result<Vec<Rental>, RentalError> {
        self.repository.find_all().await
    }

    async fn get_rental(&self, id: &RentalId) -> Result<Rental, RentalError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(RentalError::NotFound(*id))
    }

    async fn create_rental(
        &self,
        command: CreateRentalCommand,
        owner: UserId,
        picture: Option<PictureUpload>,
    ) -> Result<Rental, RentalError> {
        let picture = match picture {
            Some(upload) => Some(self.picture_storage.store(upload).await?),
            None => None,
        };

        let created = self
            .repository
            .create(NewRental {
                name: command.name,
                surface: command.surface,
                price: command.price,
                picture: picture.clone(),
                description: command.description,
                owner_id: owner,
                created_at: Utc::now(),
            })
            .await;

        let rental = match (created, picture) {
            (Ok(rental), _) => rental,
            (Err(e), Some(url)) => {
                if let Err(cleanup) = self.picture_storage.delete(&url).await {
                    tracing::warn!(url = %url, error = %cleanup, "Orphaned picture left behind");
                }
                return Err(e);
            }
            (Err(e), None) => return Err(e),
        };

        tracing::info!(rental_id = %rental.id, owner_id = %owner, "Rental created");

        Ok(rental)
    }

    async fn update_rental(
        &self,
        id: &RentalId,
        command: UpdateRentalCommand,
        requester: UserId,
    ) -> Result<Rental, RentalError> {
        let mut rental = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(RentalError::NotFound(*id))?;

        if !auth::can_mutate(&requester, &rental.owner_id) {
            tracing::warn!(
                rental_id = %id,
                user_id = %requester,
                owner_id = %rental.owner_id,
                "Rental update denied: requester is not the owner"
            );
            return Err(RentalError::Forbidden {
                user_id: requester,
                rental_id: *id,
            });
        }

        rental.name = command.name;
        rental.surface = command.surface;
        rental.price = command.price;
        rental.description = command.description;
        rental.updated_at = Utc::now();

        let updated = self.repository.update(rental).await?;

        tracing::info!(rental_id = %updated.id, "Rental updated");

        Ok(updated)
    }
}
