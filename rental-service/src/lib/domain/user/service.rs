use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for account operations.
///
/// Registration and login orchestration on top of the shared [`Authenticator`].
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<(User, String), UserError> {
        if self.repository.exists_by_email(&command.email).await? {
            tracing::warn!(email = %command.email, "Registration rejected: email already registered");
            return Err(UserError::DuplicateIdentifier(command.email.to_string()));
        }

        let password_hash = self.authenticator.hash_password(command.password.expose())?;

        let user = self
            .repository
            .create(NewUser {
                name: command.name,
                email: command.email,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        let token = self.authenticator.issue_token(user.email.as_str())?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok((user, token))
    }

    async fn login(&self, command: LoginCommand) -> Result<String, UserError> {
        let principal = match EmailAddress::new(command.email) {
            Ok(email) => self.repository.find_by_email(&email).await?,
            Err(_) => None,
        };

        let token = self
            .authenticator
            .login(&command.password, principal.as_ref())
            .map_err(|e| {
                tracing::warn!(error = %e, "Login rejected");
                UserError::from(e)
            })?;

        Ok(token)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(*id))
    }

    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(email.to_string()))
    }

    async fn find_principal(&self, subject: &str) -> Result<Option<User>, UserError> {
        match EmailAddress::new(subject.to_string()) {
            Ok(email) => self.repository.find_by_email(&email).await,
            Err(_) => Ok(None),
        }
    }
}
