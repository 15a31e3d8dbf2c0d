//! Application state shared across handlers.

use std::sync::Arc;

use library_core::CredentialStore;
use library_store::BookRegistry;

use crate::auth::TokenKeys;
use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Book registry.
    registry: Arc<BookRegistry>,
    /// Login accounts.
    credentials: Arc<CredentialStore>,
    /// Token signing and verification keys.
    keys: Arc<TokenKeys>,
    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new application state.
    ///
    /// The credential store holds the configured admin plus the built-in demo
    /// account.
    pub fn new(registry: BookRegistry, config: ServerConfig) -> Self {
        let credentials =
            CredentialStore::with_demo_accounts(&config.admin_user, &config.admin_password);
        let keys = TokenKeys::from_secret(&config.jwt_secret);
        Self {
            registry: Arc::new(registry),
            credentials: Arc::new(credentials),
            keys: Arc::new(keys),
            config: Arc::new(config),
        }
    }

    /// Get a reference to the book registry.
    pub fn registry(&self) -> &BookRegistry {
        &self.registry
    }

    /// Get a reference to the login accounts.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Get a reference to the token keys.
    pub fn keys(&self) -> &TokenKeys {
        &self.keys
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
