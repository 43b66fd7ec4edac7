//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User domain entity
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Display name, not unique
    pub username: String,
    /// Unique lookup key
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A user record that has not been persisted yet.
///
/// The repository assigns `id` and `created_at` on save.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl NewUser {
    /// Materialize the record with a fresh identity.
    pub fn into_user(self) -> User {
        User {
            id: Uuid::new_v4(),
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Registration input.
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// User display name
    #[schema(example = "alice")]
    pub username: String,
    /// User email address
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Cleartext password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret123")]
    pub password: String,
}

// The cleartext password must never reach the logs
impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl CreateUserRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User display name
    #[schema(example = "alice")]
    pub username: String,
    /// User email address
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_debug_redacts_password() {
        let request = CreateUserRequest::new("alice", "a@x.com", "secret123");
        let rendered = format!("{:?}", request);
        assert!(!rendered.contains("secret123"));
        assert!(rendered.contains("a@x.com"));
    }

    #[test]
    fn test_empty_password_fails_validation() {
        let request = CreateUserRequest::new("alice", "a@x.com", "");
        assert!(request.validate().is_err());

        let request = CreateUserRequest::new("alice", "a@x.com", "x");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_user_serialization_skips_hash() {
        let user = NewUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$v=19$opaque".to_string(),
        }
        .into_user();

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
        assert!(!format!("{:?}", user).contains("argon2id"));
    }

    #[test]
    fn test_response_from_user() {
        let user = NewUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "hash".to_string(),
        }
        .into_user();
        let id = user.id;

        let response = UserResponse::from(user);
        assert_eq!(response.id, id);
        assert_eq!(response.username, "alice");
        assert_eq!(response.email, "a@x.com");
    }
}
