//! Application services for registration, login, and token verification.

mod account;

pub use account::{AccountService, LoginRequest, RegisterRequest};
