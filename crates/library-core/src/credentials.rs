//! Static username/password store for the login endpoint.
//!
//! Passwords are held and compared in plaintext. The demo credentials are
//! part of the service's observable behavior, so they are not hashed.

use std::collections::HashMap;

use subtle::ConstantTimeEq;

/// Built-in demo account available alongside the configured admin.
pub const DEMO_USER: &str = "user";
/// Password of [`DEMO_USER`].
pub const DEMO_PASSWORD: &str = "mypassword";

/// Compare two strings without short-circuiting on the first differing byte.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Username → password mapping, fixed for the lifetime of the process.
#[derive(Clone, Default)]
pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl CredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the built-in demo account plus the given admin.
    ///
    /// When the admin username equals a built-in account, the admin password
    /// replaces the built-in one.
    pub fn with_demo_accounts(admin_user: &str, admin_password: &str) -> Self {
        let mut store = Self::new();
        store.insert(DEMO_USER, DEMO_PASSWORD);
        store.insert(admin_user, admin_password);
        store
    }

    /// Add or replace an account.
    pub fn insert(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.users.insert(username.into(), password.into());
    }

    /// Check a username/password pair.
    ///
    /// Unknown usernames still perform a comparison so both failure paths do
    /// the same work.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        match self.users.get(username) {
            Some(stored) => constant_time_eq(stored, password),
            None => {
                let _ = constant_time_eq(password, password);
                false
            }
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut usernames: Vec<&str> = self.users.keys().map(String::as_str).collect();
        usernames.sort_unstable();
        f.debug_struct("CredentialStore")
            .field("usernames", &usernames)
            .finish_non_exhaustive()
    }
}
