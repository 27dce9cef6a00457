//! System API endpoints.

use axum::{Json, response::IntoResponse};
use serde::Serialize;

use super::ApiResponse;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /api/health`
///
/// Lightweight liveness probe to indicate the API process is running.
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::success(HealthResponse { status: "ok" }))
}
