//! JSON body extraction with validation-style rejections.

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// JSON request body whose rejections render as `400 {"error": ...}`.
///
/// `axum::Json` answers a missing content type with 415 and a type mismatch
/// with 422; every API error here is a plain validation failure instead.
/// An empty document (`{}`, `[]`, `null`, `""`, `0`, `false`) counts as no
/// data at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(no_json());
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {}", e.body_text())))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(no_json());
        }
        if serde_json::from_slice::<Value>(&bytes).is_ok_and(|v| is_empty_document(&v)) {
            return Err(no_json());
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)
            .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {}", e.body_text())))?;
        Ok(Self(value))
    }
}

fn is_empty_document(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn no_json() -> ApiError {
    ApiError::Validation("No JSON data provided".to_string())
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: Option<String>,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn extract(req: Request) -> Result<JsonBody<Payload>, ApiError> {
        JsonBody::<Payload>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_valid_body() {
        let JsonBody(payload) = extract(request(Some("application/json"), r#"{"name":"x"}"#))
            .await
            .unwrap();
        assert_eq!(payload.name.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let err = extract(request(None, r#"{"name":"x"}"#)).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "No JSON data provided"));
    }

    #[tokio::test]
    async fn test_empty_body() {
        let err = extract(request(Some("application/json"), "")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "No JSON data provided"));
    }

    #[tokio::test]
    async fn test_empty_documents_are_no_data() {
        for body in ["{}", "null", "[]", r#""""#, "0", "false", " { } "] {
            let err = extract(request(Some("application/json"), body)).await.unwrap_err();
            assert!(
                matches!(err, ApiError::Validation(ref m) if m == "No JSON data provided"),
                "body {}",
                body
            );
        }
    }

    #[tokio::test]
    async fn test_json_content_type_with_charset() {
        let req = request(Some("application/json; charset=utf-8"), r#"{"name":"x"}"#);
        assert!(extract(req).await.is_ok());
    }

    #[tokio::test]
    async fn test_type_mismatch_is_validation_error() {
        let err = extract(request(Some("application/json"), r#"{"name": 5}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m.starts_with("Invalid JSON body")));
    }
}
