use axum::{Json, Router, routing::get};
use marquee_models::StatusResponse;

use crate::state::AppState;

/// Service status
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = StatusResponse)
    ),
    tag = "Status"
)]
pub async fn home() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "active".to_string(),
        message: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn init_status_router() -> Router<AppState> {
    Router::new().route("/", get(home))
}
