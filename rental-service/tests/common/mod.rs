#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::ManualClock;
use auth::PasswordHasher;
use chrono::Duration;
use chrono::Utc;
use rental_service::domain::message::errors::MessageError;
use rental_service::domain::message::models::Message;
use rental_service::domain::message::models::MessageId;
use rental_service::domain::message::models::NewMessage;
use rental_service::domain::message::ports::MessageRepository;
use rental_service::domain::message::service::MessageService;
use rental_service::domain::rental::errors::RentalError;
use rental_service::domain::rental::models::NewRental;
use rental_service::domain::rental::models::Rental;
use rental_service::domain::rental::models::RentalId;
use rental_service::domain::rental::ports::RentalRepository;
use rental_service::domain::rental::service::RentalService;
use rental_service::domain::user::errors::UserError;
use rental_service::domain::user::models::EmailAddress;
use rental_service::domain::user::models::NewUser;
use rental_service::domain::user::models::User;
use rental_service::domain::user::models::UserId;
use rental_service::domain::user::ports::UserRepository;
use rental_service::domain::user::service::UserService;
use rental_service::inbound::http::router::create_router;
use rental_service::inbound::http::router::AppState;
use rental_service::outbound::storage::LocalPictureStorage;
use serde_json::json;
use tempfile::TempDir;
use tokio::sync::Mutex;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub users: Arc<InMemoryUserRepository>,
    pub rentals: Arc<InMemoryRentalRepository>,
    pub messages: Arc<InMemoryMessageRepository>,
    pub clock: Arc<ManualClock>,
    pub upload_dir: TempDir,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let clock = Arc::new(ManualClock::new(Utc::now()));

        // Low hashing cost keeps the suite fast.
        let authenticator = Arc::new(Authenticator::with_clock(
            PasswordHasher::with_params(1024, 1, 1).expect("Invalid hashing params"),
            TEST_SECRET,
            Duration::hours(24),
            clock.clone(),
        ));

        let users = Arc::new(InMemoryUserRepository::default());
        let rentals = Arc::new(InMemoryRentalRepository::default());
        let messages = Arc::new(InMemoryMessageRepository::default());
        let storage = Arc::new(LocalPictureStorage::new(
            upload_dir.path(),
            format!("{}/uploads/", address),
        ));

        let state = AppState {
            user_service: Arc::new(UserService::new(users.clone(), authenticator.clone())),
            rental_service: Arc::new(RentalService::new(rentals.clone(), storage)),
            message_service: Arc::new(MessageService::new(messages.clone(), rentals.clone())),
            authenticator,
        };

        let router = create_router(state, upload_dir.path());

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            users,
            rentals,
            messages,
            clock,
            upload_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Register an account and return its token.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub async fn remove_by_email(&self, email: &str) {
        self.users
            .lock()
            .await
            .retain(|user| user.email.as_str() != email);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().await;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(UserError::DuplicateIdentifier(user.email.to_string()));
        }

        let created = User {
            id: UserId(users.len() as i64 + 1),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
            updated_at: user.created_at,
        };
        users.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|user| user.email == *email).cloned())
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError> {
        let users = self.users.lock().await;
        Ok(users.iter().any(|user| user.email == *email))
    }
}

#[derive(Default)]
pub struct InMemoryRentalRepository {
    rentals: Mutex<Vec<Rental>>,
}

#[async_trait]
impl RentalRepository for InMemoryRentalRepository {
    async fn find_all(&self) -> Result<Vec<Rental>, RentalError> {
        Ok(self.rentals.lock().await.clone())
    }

    async fn find_by_id(&self, id: &RentalId) -> Result<Option<Rental>, RentalError> {
        let rentals = self.rentals.lock().await;
        Ok(rentals.iter().find(|rental| rental.id == *id).cloned())
    }

    async fn exists(&self, id: &RentalId) -> Result<bool, RentalError> {
        let rentals = self.rentals.lock().await;
        Ok(rentals.iter().any(|rental| rental.id == *id))
    }

    async fn create(&self, rental: NewRental) -> Result<Rental, RentalError> {
        let mut rentals = self.rentals.lock().await;
        let created = Rental {
            id: RentalId(rentals.len() as i64 + 1),
            name: rental.name,
            surface: rental.surface,
            price: rental.price,
            picture: rental.picture,
            description: rental.description,
            owner_id: rental.owner_id,
            created_at: rental.created_at,
            updated_at: rental.created_at,
        };
        rentals.push(created.clone());

        Ok(created)
    }

    async fn update(&self, rental: Rental) -> Result<Rental, RentalError> {
        let mut rentals = self.rentals.lock().await;
        let slot = rentals
            .iter_mut()
            .find(|existing| existing.id == rental.id)
            .ok_or(RentalError::NotFound(rental.id))?;
        *slot = rental.clone();

        Ok(rental)
    }
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Mutex<Vec<Message>>,
}

impl InMemoryMessageRepository {
    pub async fn all(&self) -> Vec<Message> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(&self, message: NewMessage) -> Result<Message, MessageError> {
        let mut messages = self.messages.lock().await;
        let created = Message {
            id: MessageId(messages.len() as i64 + 1),
            rental_id: message.rental_id,
            user_id: message.user_id,
            content: message.content,
            created_at: message.created_at,
            updated_at: message.created_at,
        };
        messages.push(created.clone());

        Ok(created)
    }
}
