pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::message;
pub use domain::rental;
pub use domain::user;
pub use outbound::repositories;
