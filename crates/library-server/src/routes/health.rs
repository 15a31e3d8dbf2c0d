//! Health check and landing endpoints.

use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    #[schema(example = "healthy")]
    pub status: String,
    /// Status detail.
    #[schema(example = "Application is running")]
    pub message: String,
}

/// Landing page response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HomeResponse {
    pub message: String,
}

/// GET /health - Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Application is running".to_string(),
    })
}

/// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses((status = 200, description = "Greeting", body = HomeResponse))
)]
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Hello from Jenkins Demo!".to_string(),
    })
}

/// Build health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(home))
}
