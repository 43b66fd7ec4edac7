//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{auth_handler, greeting_handler, health_handler, user_handler};
use crate::domain::{CreateUserRequest, UserResponse};

/// OpenAPI documentation for the LAB10 API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "LAB10",
        version = "0.1.0",
        description = "Greeting endpoints and a user account service",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        greeting_handler::index,
        greeting_handler::hello,
        health_handler::health,
        auth_handler::login,
        user_handler::register,
        user_handler::list_users,
    ),
    components(
        schemas(
            CreateUserRequest,
            UserResponse,
            auth_handler::LoginRequest,
            auth_handler::LoginResponse,
            health_handler::HealthResponse,
        )
    ),
    tags(
        (name = "Greeting", description = "Static greeting pages"),
        (name = "Health", description = "Storage connectivity"),
        (name = "Authentication", description = "Credential checks"),
        (name = "Users", description = "User registration and listing")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_public_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/hello", "/health", "/users", "/auth/login"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_document_registers_health_schema() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        assert!(schemas.contains_key("HealthResponse"));
    }
}
