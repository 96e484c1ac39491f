use async_trait::async_trait;

use crate::domain::rental::errors::RentalError;
use crate::domain::rental::models::CreateRentalCommand;
use crate::domain::rental::models::NewRental;
use crate::domain::rental::models::PictureUpload;
use crate::domain::rental::models::Rental;
use crate::domain::rental::models::RentalId;
use crate::domain::rental::models::UpdateRentalCommand;
use crate::domain::user::models::UserId;

/// Port for rental domain service operations.
#[async_trait]
pub trait RentalServicePort: Send + Sync + 'static {
    /// List every rental.
    async fn list_rentals(&self) -> Result<Vec<Rental>, RentalError>;

    /// Retrieve rental by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Rental does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_rental(&self, id: &RentalId) -> Result<Rental, RentalError>;

    /// Create a rental owned by `owner`.
    ///
    /// # Arguments
    /// * `command` - Validated listing fields
    /// * `owner` - Authenticated principal creating the listing
    /// * `picture` - Optional picture, stored before the listing is persisted
    ///
    /// # Errors
    /// * `InvalidPicture` - Picture is empty or not an image
    /// * `Storage` - Picture could not be written
    /// * `DatabaseError` - Database operation failed
    async fn create_rental(
        &self,
        command: CreateRentalCommand,
        owner: UserId,
        picture: Option<PictureUpload>,
    ) -> Result<Rental, RentalError>;

    /// Update a rental on behalf of `requester`.
    ///
    /// # Errors
    /// * `NotFound` - Rental does not exist
    /// * `Forbidden` - Requester is not the owner
    /// * `DatabaseError` - Database operation failed
    async fn update_rental(
        &self,
        id: &RentalId,
        command: UpdateRentalCommand,
        requester: UserId,
    ) -> Result<Rental, RentalError>;
}

/// Persistence operations for rental aggregate.
#[async_trait]
pub trait RentalRepository: Send + Sync + 'static {
    async fn find_all(&self) -> Result<Vec<Rental>, RentalError>;

    async fn find_by_id(&self, id: &RentalId) -> Result<Option<Rental>, RentalError>;

    async fn exists(&self, id: &RentalId) -> Result<bool, RentalError>;

    /// Persist a new rental and return it with its assigned identifier.
    async fn create(&self, rental: NewRental) -> Result<Rental, RentalError>;

    /// Overwrite the mutable fields of an existing rental.
    ///
    /// # Errors
    /// * `NotFound` - Rental does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, rental: Rental) -> Result<Rental, RentalError>;
}

/// Storage for uploaded rental pictures.
#[async_trait]
pub trait PictureStorage: Send + Sync + 'static {
    /// Store a picture and return its public URL.
    ///
    /// # Errors
    /// * `InvalidPicture` - Picture is empty or not an image
    /// * `Storage` - Write failed
    async fn store(&self, picture: PictureUpload) -> Result<String, RentalError>;

    /// Remove a previously stored picture by its public URL.
    ///
    /// Deleting a picture that is already gone succeeds.
    ///
    /// # Errors
    /// * `Storage` - URL is not one of ours, or removal failed
    async fn delete(&self, url: &str) -> Result<(), RentalError>;
}
