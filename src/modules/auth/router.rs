use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{authenticate, logout, refresh, session};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/authenticate", post(authenticate))
        .route("/refresh", get(refresh))
        .route("/logout", get(logout))
}

/// Routes that sit behind the bearer-token gate.
pub fn init_admin_router() -> Router<AppState> {
    Router::new().route("/session", get(session))
}
