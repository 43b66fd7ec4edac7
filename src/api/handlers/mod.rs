//! HTTP request handlers.

pub mod auth_handler;
pub mod greeting_handler;
pub mod health_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use user_handler::user_routes;
