use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::rental::errors::RentalError;
use crate::domain::rental::models::Amount;
use crate::domain::rental::models::Description;
use crate::domain::rental::models::NewRental;
use crate::domain::rental::models::Rental;
use crate::domain::rental::models::RentalId;
use crate::domain::rental::models::RentalName;
use crate::domain::rental::ports::RentalRepository;
use crate::domain::user::models::UserId;

const RENTAL_COLUMNS: &str =
    "id, name, surface, price, picture, description, owner_id, created_at, updated_at";

pub struct PostgresRentalRepository {
    pool: PgPool,
}

impl PostgresRentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct RentalRow {
    id: i64,
    name: String,
    surface: f64,
    price: f64,
    picture: Option<String>,
    description: Option<String>,
    owner_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RentalRow> for Rental {
    type Error = RentalError;

    fn try_from(row: RentalRow) -> Result<Self, Self::Error> {
        Ok(Rental {
            id: RentalId(row.id),
            name: RentalName::new(row.name)?,
            surface: Amount::new("surface", row.surface)?,
            price: Amount::new("price", row.price)?,
            picture: row.picture,
            description: row.description.map(Description::new).transpose()?,
            owner_id: UserId(row.owner_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> RentalError {
    tracing::error!(error = %e, "Rental query failed");
    RentalError::DatabaseError(e.to_string())
}

#[async_trait]
impl RentalRepository for PostgresRentalRepository {
    async fn find_all(&self) -> Result<Vec<Rental>, RentalError> {
        let query = format!("SELECT {} FROM rentals ORDER BY id", RENTAL_COLUMNS);

        sqlx::query_as::<_, RentalRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?
            .into_iter()
            .map(Rental::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: &RentalId) -> Result<Option<Rental>, RentalError> {
        let query = format!("SELECT {} FROM rentals WHERE id = $1", RENTAL_COLUMNS);

        sqlx::query_as::<_, RentalRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(Rental::try_from)
            .transpose()
    }

    async fn exists(&self, id: &RentalId) -> Result<bool, RentalError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM rentals WHERE id = $1)")
            .bind(id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)
    }

    async fn create(&self, rental: NewRental) -> Result<Rental, RentalError> {
        let query = format!(
            r#"
            INSERT INTO rentals (name, surface, price, picture, description, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {}
            "#,
            RENTAL_COLUMNS
        );

        sqlx::query_as::<_, RentalRow>(&query)
            .bind(rental.name.as_str())
            .bind(rental.surface.value())
            .bind(rental.price.value())
            .bind(rental.picture.as_deref())
            .bind(rental.description.as_ref().map(Description::as_str))
            .bind(rental.owner_id.0)
            .bind(rental.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?
            .try_into()
    }

    async fn update(&self, rental: Rental) -> Result<Rental, RentalError> {
        let query = format!(
            r#"
            UPDATE rentals
            SET name = $2, surface = $3, price = $4, description = $5, updated_at = $6
            WHERE id = $1
            RETURNING {}
            "#,
            RENTAL_COLUMNS
        );

        sqlx::query_as::<_, RentalRow>(&query)
            .bind(rental.id.0)
            .bind(rental.name.as_str())
            .bind(rental.surface.value())
            .bind(rental.price.value())
            .bind(rental.description.as_ref().map(Description::as_str))
            .bind(rental.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .ok_or(RentalError::NotFound(rental.id))?
            .try_into()
    }
}
