//! In-memory adapters for account persistence.

mod user;

pub use user::InMemoryUserRepository;
