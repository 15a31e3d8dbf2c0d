//! Route definitions for the HTTP API.

pub mod auth;
pub mod books;
pub mod docs;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(books::routes(state.clone()))
        .merge(docs::routes())
        .with_state(state)
}
