pub mod message;
pub mod rental;
pub mod user;

pub use message::PostgresMessageRepository;
pub use rental::PostgresRentalRepository;
pub use user::PostgresUserRepository;
