//! Domain layer - Core business entities and logic
//!
//! Contains the user record, its request/response shapes, and the
//! password hashing abstraction the account service depends on.

pub mod password;
pub mod user;

pub use password::{Argon2Encoder, PasswordEncoder};
pub use user::{CreateUserRequest, NewUser, User, UserResponse};

#[cfg(test)]
pub use password::MockPasswordEncoder;
