use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account and sign it in.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, and password
    ///
    /// # Returns
    /// Created user and a freshly issued token for it
    ///
    /// # Errors
    /// * `DuplicateIdentifier` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<(User, String), UserError>;

    /// Verify credentials and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<String, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by login email.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No user with this email
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError>;

    /// Resolve a token subject to the account it names.
    ///
    /// # Returns
    /// `None` when the subject is not a valid email or no such account exists
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_principal(&self, subject: &str) -> Result<Option<User>, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Returns
    /// Created user entity with its assigned identifier
    ///
    /// # Errors
    /// * `DuplicateIdentifier` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Check whether an email is already registered.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError>;
}
