//! Static greeting endpoints.

use axum::response::Html;

use crate::config::{HELLO_MESSAGE, WELCOME_MESSAGE};

/// Welcome page
#[utoipa::path(
    get,
    path = "/",
    tag = "Greeting",
    responses((status = 200, description = "Welcome text", body = String, content_type = "text/html"))
)]
pub async fn index() -> Html<&'static str> {
    Html(WELCOME_MESSAGE)
}

/// Greeting
#[utoipa::path(
    get,
    path = "/hello",
    tag = "Greeting",
    responses((status = 200, description = "Greeting text", body = String))
)]
pub async fn hello() -> &'static str {
    HELLO_MESSAGE
}
