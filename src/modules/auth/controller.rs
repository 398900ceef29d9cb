use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use marquee_core::AppError;
use marquee_models::{LoginRequest, SessionResponse, TokenPair};
use tracing::instrument;
use utoipa::ToSchema;

use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Log in and receive a token pair
///
/// The refresh token is also set as an `HttpOnly` cookie.
#[utoipa::path(
    post,
    path = "/authenticate",
    request_body = LoginRequest,
    responses(
        (status = 202, description = "Login successful", body = TokenPair),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<TokenPair>), AppError> {
    let pair = AuthService::login(&state, dto).await?;
    let jar = jar.add(state.cookies.refresh_cookie(&pair.refresh_token));

    Ok((StatusCode::ACCEPTED, jar, Json(pair)))
}

/// Rotate the refresh cookie into a new token pair
#[utoipa::path(
    get,
    path = "/refresh",
    responses(
        (status = 200, description = "New token pair issued", body = TokenPair),
        (status = 401, description = "Missing, invalid or expired refresh cookie", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<TokenPair>), AppError> {
    let pair = AuthService::rotate(&state, state.cookies.refresh_token(&jar)).await?;
    let jar = jar.add(state.cookies.refresh_cookie(&pair.refresh_token));

    Ok((jar, Json(pair)))
}

/// Clear the refresh cookie
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 202, description = "Refresh cookie cleared")
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (StatusCode, CookieJar) {
    (StatusCode::ACCEPTED, jar.add(state.cookies.expired_cookie()))
}

/// Describe the session behind the bearer token
#[utoipa::path(
    get,
    path = "/admin/session",
    responses(
        (status = 200, description = "Authenticated session", body = SessionResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip_all, fields(sub = %auth_user.0.sub))]
pub async fn session(auth_user: AuthUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        user_id: auth_user.user_id().to_string(),
        name: auth_user.name().map(str::to_string),
        expires_at: auth_user.0.exp,
    })
}
