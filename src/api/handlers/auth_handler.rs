//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::{AppError, AppResult};

/// User login request
#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[schema(example = "a@x.com")]
    pub email: String,
    /// User password
    #[schema(example = "secret123")]
    pub password: String,
}

/// Successful login outcome
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = true)]
    pub authenticated: bool,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Check an email/password pair
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let authenticated = state
        .account_service
        .authenticate(&payload.email, &payload.password)
        .await?;

    // Unknown email and wrong password are reported identically
    if !authenticated {
        return Err(AppError::InvalidCredentials);
    }

    Ok(Json(LoginResponse { authenticated }))
}
