use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, HeaderValue, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use marquee_auth::{Claims, TokenError};
use marquee_core::AppError;
use tracing::{error, warn};

use crate::metrics::track_jwt_validation;
use crate::state::AppState;

/// Claims of a verified access token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }

    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }
}

/// Verifies the `Authorization` header of a request.
pub fn verify_bearer(state: &AppState, headers: &HeaderMap) -> Result<Claims, TokenError> {
    let header_value = match headers.get(header::AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| TokenError::MalformedHeader)?,
        None => "",
    };

    let result = state.verifier.verify(header_value).map(|(claims, _)| claims);

    match &result {
        Ok(_) => track_jwt_validation("valid"),
        Err(err) => {
            if err.is_server_fault() {
                error!(reason = err.reason(), error = %err, "bearer token check failed");
            } else {
                warn!(reason = err.reason(), "bearer token rejected");
            }
            track_jwt_validation(err.reason());
        }
    }

    result
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let claims = verify_bearer(state, &parts.headers)?;
        Ok(AuthUser(claims))
    }
}

/// Gate for protected route groups.
///
/// ```rust,ignore
/// Router::new()
///     .nest("/admin", init_admin_router())
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let mut response = match verify_bearer(&state, req.headers()) {
        Ok(claims) => {
            req.extensions_mut().insert(AuthUser(claims));
            next.run(req).await
        }
        Err(err) => AppError::from(err).into_response(),
    };

    response
        .headers_mut()
        .append(header::VARY, HeaderValue::from_static("Authorization"));
    response
}
