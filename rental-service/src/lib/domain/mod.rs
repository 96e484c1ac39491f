pub mod message;
pub mod rental;
pub mod user;
