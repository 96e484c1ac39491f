use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use rental_service::config::Config;
use rental_service::domain::message::service::MessageService;
use rental_service::domain::rental::service::RentalService;
use rental_service::domain::user::service::UserService;
use rental_service::inbound::http::router::create_router;
use rental_service::inbound::http::router::AppState;
use rental_service::outbound::repositories::PostgresMessageRepository;
use rental_service::outbound::repositories::PostgresRentalRepository;
use rental_service::outbound::repositories::PostgresUserRepository;
use rental_service::outbound::storage::LocalPictureStorage;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rental_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "rental-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        upload_path = %config.upload.path,
        token_ttl_ms = config.jwt.expiration_ms,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        Duration::milliseconds(config.jwt.expiration_ms),
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let rental_repository = Arc::new(PostgresRentalRepository::new(pg_pool.clone()));
    let message_repository = Arc::new(PostgresMessageRepository::new(pg_pool));
    let picture_storage = Arc::new(LocalPictureStorage::new(
        &config.upload.path,
        config.upload.url.as_str(),
    ));

    let state = AppState {
        user_service: Arc::new(UserService::new(
            user_repository,
            Arc::clone(&authenticator),
        )),
        rental_service: Arc::new(RentalService::new(
            Arc::clone(&rental_repository),
            picture_storage,
        )),
        message_service: Arc::new(MessageService::new(message_repository, rental_repository)),
        authenticator,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state, &config.upload.path)).await?;

    Ok(())
}
