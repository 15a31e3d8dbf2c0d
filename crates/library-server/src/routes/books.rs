//! Book routes. Both require authentication.
//!
//! - GET /books/get_books - List every book in insertion order
//! - POST /books/add_book - Append a new book

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use library_core::{Book, BookDraft};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{Identity, require_auth};
use crate::error::{ApiResult, ErrorResponse};
use crate::extract::JsonBody;
use crate::state::AppState;

/// Response for GET /books/get_books.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BooksResponse {
    /// List of books.
    pub books: Vec<Book>,
}

/// Response for POST /books/add_book.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookCreatedResponse {
    /// Success message.
    #[schema(example = "Book added successfully")]
    pub message: String,
    /// Created book.
    pub book: Book,
}

/// GET /books/get_books
#[utoipa::path(
    get,
    path = "/books/get_books",
    tag = "books",
    security(("apikey" = []), ("Bearer" = [])),
    responses(
        (status = 200, description = "All books", body = BooksResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    )
)]
pub async fn get_books(State(state): State<AppState>, identity: Identity) -> Json<BooksResponse> {
    let books = state.registry().list().await;
    tracing::debug!(
        user = identity.username().unwrap_or("<api-key>"),
        count = books.len(),
        "Listed books"
    );
    Json(BooksResponse { books })
}

/// POST /books/add_book
#[utoipa::path(
    post,
    path = "/books/add_book",
    tag = "books",
    request_body = BookDraft,
    security(("apikey" = []), ("Bearer" = [])),
    responses(
        (status = 201, description = "Book created", body = BookCreatedResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    identity: Identity,
    JsonBody(draft): JsonBody<BookDraft>,
) -> ApiResult<(StatusCode, Json<BookCreatedResponse>)> {
    let book = state.registry().append(draft).await?;

    tracing::info!(
        book_id = %book.id,
        title = %book.title,
        user = identity.username().unwrap_or("<api-key>"),
        "Book added"
    );

    Ok((
        StatusCode::CREATED,
        Json(BookCreatedResponse {
            message: "Book added successfully".to_string(),
            book,
        }),
    ))
}

/// Build book routes behind the auth gate.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/books/get_books", get(get_books))
        .route("/books/add_book", post(add_book))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
