use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::domain::user::ports::UserRepository;

const USER_COLUMNS: &str = "id, name, email, password, created_at, updated_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            name: UserName::new(row.name)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> UserError {
    tracing::error!(error = %e, "User query failed");
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let query = format!(
            r#"
            INSERT INTO users (name, email, password, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user.name.as_str())
            .bind(user.email.as_str())
            .bind(&user.password_hash)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return UserError::DuplicateIdentifier(user.email.to_string());
                    }
                }
                database_error(e)
            })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        sqlx::query_as::<_, UserRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);

        sqlx::query_as::<_, UserRow>(&query)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)
    }
}
