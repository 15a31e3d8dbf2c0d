//! OpenAPI document and Swagger UI.

use axum::{Json, Router, extract::State, response::Html, routing::get};
use library_core::{Book, BookDraft};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::config::ServerConfig;
use crate::error::ErrorResponse;
use crate::routes::{auth, books, health};
use crate::state::AppState;

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/swagger.json";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "apikey",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("ApiKey"))),
        );
        components.add_security_scheme(
            "Bearer",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Type in the value input box: 'Bearer <JWT>', where JWT is the token",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::home,
        auth::login,
        books::get_books,
        books::add_book,
    ),
    components(schemas(
        Book,
        BookDraft,
        ErrorResponse,
        auth::LoginRequest,
        auth::TokenResponse,
        books::BooksResponse,
        books::BookCreatedResponse,
        health::HealthResponse,
        health::HomeResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "service", description = "Service status"),
        (name = "auth", description = "Authentication operations"),
        (name = "books", description = "Books operations")
    )
)]
pub struct ApiDoc;

/// OpenAPI document with the configured title, version and description.
pub fn openapi_document(config: &ServerConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = config.api_title.clone();
    doc.info.version = config.api_version.clone();
    doc.info.description = Some(config.api_description.clone());
    doc
}

async fn openapi_spec(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(openapi_document(state.config()))
}

async fn swagger_ui(State(state): State<AppState>) -> Html<String> {
    Html(swagger_page(&state.config().api_title))
}

fn swagger_page(title: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{spec}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##,
        title = html_escape(title),
        spec = OPENAPI_PATH,
    )
}

fn html_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Build documentation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(OPENAPI_PATH, get(openapi_spec))
        .route("/swagger", get(swagger_ui))
        .route("/swagger/", get(swagger_ui))
}
