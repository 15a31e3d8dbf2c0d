//! Authentication: bearer token issuing/verification and the auth gate.
//!
//! Protected routes accept either a static API key in the `ApiKey` header or
//! an HS256 JWT in `Authorization: Bearer <token>`. The decision itself is
//! [`authorize`], a pure function of the request headers, the configured keys
//! and the current time; [`require_auth`] wraps it as axum middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use library_core::constant_time_eq;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the static API key (`ApiKey`, matched case-insensitively).
pub const API_KEY_HEADER: &str = "apikey";

const BEARER_PREFIX: &str = "Bearer ";

/// JWT claims.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Authenticated username.
    pub username: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration time (unix timestamp).
    pub exp: i64,
}

/// Why the gate refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Neither a matching API key nor a bearer token was supplied.
    AuthRequired,
    /// The bearer token is malformed or its signature does not verify.
    InvalidToken,
    /// The bearer token's expiration is at or before the current time.
    ExpiredToken,
}

impl From<Denial> for ApiError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::AuthRequired => ApiError::AuthRequired,
            Denial::InvalidToken => ApiError::InvalidToken,
            Denial::ExpiredToken => ApiError::ExpiredToken,
        }
    }
}

/// Caller identity bound to a request that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Authenticated with the shared API key; no per-user identity.
    ApiKey,
    /// Authenticated with a bearer token issued to `username`.
    User { username: String },
}

impl Identity {
    /// Username embedded in the bearer token, if any.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::ApiKey => None,
            Self::User { username } => Some(username),
        }
    }
}

/// HS256 keys for issuing and verifying bearer tokens.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    /// Derive both keys from the shared signing secret.
    pub fn from_secret(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `verify`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Create a token for `username`, issued at `now` and valid for `lifetime`.
    pub fn issue(
        &self,
        username: &str,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<String, ApiError> {
        let exp = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| ApiError::Internal("Token expiration out of range".to_string()))?;
        let claims = Claims {
            username: username.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify a token's signature, then its expiration against `now`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, Denial> {
        let token_data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "JWT validation failed");
            Denial::InvalidToken
        })?;

        let claims = token_data.claims;
        if now.timestamp() >= claims.exp {
            return Err(Denial::ExpiredToken);
        }
        Ok(claims)
    }
}

/// Decide whether a request may reach a protected handler.
///
/// Order:
/// 1. `ApiKey` header equal to the configured key.
/// 2. `Authorization: Bearer <jwt>` with a valid signature and unexpired claims.
/// 3. Otherwise `AuthRequired`.
///
/// A wrong API key is not an error by itself; evaluation continues with the
/// bearer token.
pub fn authorize(
    headers: &HeaderMap,
    api_key: &str,
    keys: &TokenKeys,
    now: DateTime<Utc>,
) -> Result<Identity, Denial> {
    let supplied_key = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if supplied_key.is_some_and(|supplied| constant_time_eq(supplied, api_key)) {
        return Ok(Identity::ApiKey);
    }

    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX));
    if let Some(token) = bearer {
        let claims = keys.verify(token.trim(), now)?;
        return Ok(Identity::User {
            username: claims.username,
        });
    }

    Err(Denial::AuthRequired)
}

/// Middleware guarding protected routes.
///
/// On success the caller's [`Identity`] is stored in the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = authorize(
        request.headers(),
        &state.config().api_key,
        state.keys(),
        Utc::now(),
    )
    .map_err(|denial| {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            reason = ?denial,
            "Authentication denied"
        );
        ApiError::from(denial)
    })?;

    tracing::debug!(user = identity.username().unwrap_or("<api-key>"), "Authenticated");
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(ApiError::AuthRequired)
    }
}
