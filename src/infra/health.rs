//! Storage liveness probe used by `GET /health`.

use async_trait::async_trait;

use crate::errors::AppResult;

/// Something the health endpoint can probe.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Name reported in the health response
    fn component(&self) -> &'static str;

    async fn check(&self) -> AppResult<()>;
}
