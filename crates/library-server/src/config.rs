//! Server configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;

/// Admin password shipped with the demo; refused by the production profile.
pub const DEFAULT_ADMIN_PASSWORD: &str = "password123";

/// Longest accepted bearer token lifetime (100 years).
pub const MAX_JWT_EXPIRATION_HOURS: u64 = 876_000;

/// Deployment profile, selected by `APP_ENV` (or `ENV`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    #[default]
    Development,
    Production,
    Test,
}

impl Profile {
    /// Parse a profile name; unknown names fall back to development.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "production" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        }
    }

    fn default_debug(self) -> bool {
        !matches!(self, Self::Production)
    }

    fn default_port(self) -> u16 {
        match self {
            Self::Test => 5002,
            _ => 5001,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        };
        f.write_str(name)
    }
}

/// Server configuration.
#[derive(Clone)]
pub struct ServerConfig {
    /// Deployment profile.
    pub profile: Profile,
    /// Interface to bind.
    pub host: String,
    /// Server port to listen on.
    pub port: u16,
    /// Debug mode (verbose logging).
    pub debug: bool,
    /// Static API key accepted in the `ApiKey` header.
    pub api_key: String,
    /// HMAC secret used to sign and verify bearer tokens.
    pub jwt_secret: String,
    /// Bearer token lifetime in hours.
    pub jwt_expiration_hours: u64,
    /// Admin account username.
    pub admin_user: String,
    /// Admin account password.
    pub admin_password: String,
    /// OpenAPI document title.
    pub api_title: String,
    /// OpenAPI document version.
    pub api_version: String,
    /// OpenAPI document description.
    pub api_description: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `JWT_SECRET_KEY`: token signing secret
    /// - `API_KEY`: static API key
    ///
    /// Optional:
    /// - `APP_ENV` / `ENV`: profile (default: "development")
    /// - `HOST` (default: "0.0.0.0"), `PORT` (default: 5001, 5002 for test)
    /// - `DEBUG` (default: true except in production)
    /// - `ADMIN_USER` (default: "admin"), `ADMIN_PASSWORD` (default: "password123")
    /// - `JWT_EXPIRATION_HOURS` (default: 2)
    /// - `API_TITLE`, `API_VERSION`, `API_DESCRIPTION`
    /// - `LOG_LEVEL` (default: "debug" when DEBUG, else "info")
    /// - `CORS_ALLOWED_ORIGINS` (default: "*")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required =
            |name: &str| var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let profile = var("APP_ENV")
            .or_else(|| var("ENV"))
            .map(|name| Profile::from_name(&name))
            .unwrap_or_default();

        let api_key = required("API_KEY")?;
        let jwt_secret = required("JWT_SECRET_KEY")?;

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(raw) => parse_value("PORT", &raw)?,
            None => profile.default_port(),
        };
        let debug = var("DEBUG")
            .map(|raw| parse_flag(&raw))
            .unwrap_or_else(|| profile.default_debug());

        let jwt_expiration_hours: u64 = match var("JWT_EXPIRATION_HOURS") {
            Some(raw) => parse_value("JWT_EXPIRATION_HOURS", &raw)?,
            None => 2,
        };
        if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&jwt_expiration_hours) {
            return Err(ConfigError::InvalidValue {
                name: "JWT_EXPIRATION_HOURS".to_string(),
                reason: format!("must be between 1 and {}", MAX_JWT_EXPIRATION_HOURS),
            });
        }

        let admin_user = var("ADMIN_USER").unwrap_or_else(|| "admin".to_string());
        let admin_password =
            var("ADMIN_PASSWORD").unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string());

        let default_level = if debug { "debug" } else { "info" };
        let log_level = var("LOG_LEVEL").unwrap_or_else(|| default_level.to_string());

        let config = Self {
            profile,
            host,
            port,
            debug,
            api_key,
            jwt_secret,
            jwt_expiration_hours,
            admin_user,
            admin_password,
            api_title: var("API_TITLE").unwrap_or_else(|| "Digital Library API".to_string()),
            api_version: var("API_VERSION").unwrap_or_else(|| "1.0".to_string()),
            api_description: var("API_DESCRIPTION").unwrap_or_else(|| {
                "A simple digital library API with book management and authentication".to_string()
            }),
            log_level,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Profile-specific checks on an otherwise complete configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.profile == Profile::Production && self.admin_password == DEFAULT_ADMIN_PASSWORD {
            return Err(ConfigError::InsecureDefault(
                "change the default admin password in production".to_string(),
            ));
        }
        Ok(())
    }

    /// Address string handed to the listener (`host:port`).
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Bearer token lifetime, saturating at `TimeDelta::MAX`.
    pub fn token_lifetime(&self) -> TimeDelta {
        i64::try_from(self.jwt_expiration_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .unwrap_or(TimeDelta::MAX)
    }

    /// Bearer token lifetime in seconds, as reported by the login endpoint.
    pub fn token_lifetime_secs(&self) -> u64 {
        self.jwt_expiration_hours.saturating_mul(3600)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("profile", &self.profile)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("debug", &self.debug)
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("admin_user", &self.admin_user)
            .field("log_level", &self.log_level)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish_non_exhaustive()
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1" | "t")
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("{0} environment variable is required")]
    MissingEnvVar(String),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    /// A demo default is still in use where it is not allowed.
    #[error("insecure configuration: {0}")]
    InsecureDefault(String),
}
