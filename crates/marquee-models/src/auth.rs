//! Authentication DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Credentials posted to `/authenticate`.
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "secret")]
    pub password: String,
}

// Keeps the password out of `#[instrument]` spans.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Service liveness payload served at `/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

/// Who the bearer token on the current request belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub user_id: String,
    pub name: Option<String>,
    pub expires_at: i64,
}
