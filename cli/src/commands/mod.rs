//! Command implementations and the HTTP plumbing they share.

pub mod add;
pub mod health;
pub mod list;
pub mod login;

use anyhow::Result;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use login::TokenResponse;

/// Errors reported to the user.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Neither an API key nor a username/password pair was configured.
    #[error("Missing credentials: set API_KEY or ADMIN_USER/ADMIN_PASSWORD")]
    MissingCredentials,

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Login succeeded but the response carried no token.
    #[error("No access_token in auth response")]
    MissingToken,
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Output that can also be printed for humans.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Print `value` as pretty JSON, or in human form when requested.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Send a request and decode a JSON success body.
pub async fn make_request<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.error)
            .unwrap_or(text);
        return Err(CliError::Api {
            status: status.as_u16(),
            message,
        }
        .into());
    }

    Ok(response.json().await?)
}

/// Where protected requests get their credentials from.
///
/// An API key is preferred; otherwise the client logs in with username and
/// password and sends the resulting bearer token.
#[derive(Debug, Clone, Default)]
pub struct AuthSource {
    api_key: Option<String>,
    credentials: Option<(String, String)>,
}

impl AuthSource {
    pub fn from_options(
        api_key: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            api_key: non_empty(api_key),
            credentials: non_empty(username).zip(non_empty(password)),
        }
    }

    /// Username and password, when both were given.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.credentials
            .as_ref()
            .map(|(u, p)| (u.as_str(), p.as_str()))
    }

    /// Attach credentials to a protected request.
    pub async fn authorize(
        &self,
        client: &Client,
        base_url: &str,
        request: RequestBuilder,
    ) -> Result<RequestBuilder> {
        if let Some(key) = &self.api_key {
            return Ok(request.header("ApiKey", key));
        }
        let (username, password) = self.credentials().ok_or(CliError::MissingCredentials)?;
        let token = request_token(client, base_url, username, password).await?;
        Ok(request.bearer_auth(token.access_token))
    }
}

/// POST /auth/login
pub async fn request_token(
    client: &Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<TokenResponse> {
    let url = format!("{}/auth/login", base_url);
    let body = serde_json::json!({"username": username, "password": password});

    let token: TokenResponse = make_request(client.post(&url).json(&body)).await?;
    if token.access_token.is_empty() {
        return Err(CliError::MissingToken.into());
    }
    Ok(token)
}


#[cfg(test)]
mod tests {
    use super::testutil::{API_KEY, spawn_server};
    use super::*;

    #[test]
    fn test_auth_source_keeps_key_and_credentials() {
        let auth = AuthSource::from_options(
            Some("key".into()),
            Some("admin".into()),
            Some("password123".into()),
        );
        assert_eq!(auth.api_key.as_deref(), Some("key"));
        assert_eq!(auth.credentials(), Some(("admin", "password123")));
    }

    #[test]
    fn test_auth_source_ignores_blank_and_partial_values() {
        let auth = AuthSource::from_options(Some(String::new()), Some("admin".into()), None);
        assert_eq!(auth.api_key, None);
        assert_eq!(auth.credentials(), None);
    }

    #[tokio::test]
    async fn test_missing_credentials_error() {
        let client = Client::new();
        let err = AuthSource::default()
            .authorize(&client, "http://127.0.0.1:1", client.get("http://127.0.0.1:1"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing credentials: set API_KEY or ADMIN_USER/ADMIN_PASSWORD"
        );
    }

    #[tokio::test]
    async fn test_login_against_server() {
        let base_url = spawn_server().await;
        let client = Client::new();

        let token = request_token(&client, &base_url, "admin", "password123").await.unwrap();
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, 7200);

        let err = request_token(&client, &base_url, "admin", "wrong").await.unwrap_err();
        let api = err.downcast_ref::<CliError>().unwrap();
        assert!(matches!(
            api,
            CliError::Api { status: 401, message } if message == "Invalid credentials"
        ));
    }

    #[tokio::test]
    async fn test_authorize_with_api_key_and_credentials() {
        let base_url = spawn_server().await;
        let client = Client::new();
        let url = format!("{}/books/get_books", base_url);

        for auth in [
            AuthSource::from_options(Some(API_KEY.to_string()), None, None),
            AuthSource::from_options(
                None,
                Some("user".to_string()),
                Some("mypassword".to_string()),
            ),
        ] {
            let request = auth.authorize(&client, &base_url, client.get(&url)).await.unwrap();
            let books: list::BooksResponse = make_request(request).await.unwrap();
            assert_eq!(books.books.len(), 3);
        }
    }
}
