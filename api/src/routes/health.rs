use crate::response::ApiResponse;
use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;
use util::state::AppState;

#[derive(Serialize, Default)]
pub struct HealthStatus {
    pub status: String,
}

/// GET /api/health
///
/// Public liveness probe.
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            HealthStatus {
                status: "ok".to_string(),
            },
            "Service is healthy",
        )),
    )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}
