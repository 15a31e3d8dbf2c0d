//! Authentication routes: login.

use axum::{Json, Router, extract::State, routing::post};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::extract::JsonBody;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize, ToSchema)]
#[schema(as = Login)]
pub struct LoginRequest {
    /// Username.
    #[schema(example = "admin")]
    #[serde(default)]
    pub username: Option<String>,
    /// Password.
    #[schema(example = "password123")]
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Both fields, when present and non-empty.
    fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = Token)]
pub struct TokenResponse {
    /// JWT access token.
    pub access_token: String,
    /// Token type.
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Token expiration time in seconds.
    #[schema(example = 7200)]
    pub expires_in: u64,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    body: Result<JsonBody<LoginRequest>, ApiError>,
) -> ApiResult<Json<TokenResponse>> {
    let request = body.map(|JsonBody(r)| r).unwrap_or_default();
    let (username, password) = request
        .credentials()
        .ok_or_else(|| ApiError::Validation("Username and password required".to_string()))?;

    if !state.credentials().verify(username, password) {
        tracing::info!(username = %username, "Login rejected");
        return Err(ApiError::InvalidCredentials);
    }

    let config = state.config();
    let access_token = state
        .keys()
        .issue(username, Utc::now(), config.token_lifetime())?;

    tracing::info!(username = %username, "User logged in");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: config.token_lifetime_secs(),
    }))
}

/// Build auth routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}
