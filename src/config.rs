//! Environment-supplied configuration.
//!
//! The demo takes its backend base URL and map-provider access token from
//! the environment. A missing or placeholder token is reported as a
//! distinct configuration error at startup instead of surfacing later as
//! an opaque map failure.

use std::env;
use std::fmt;

pub const BACKEND_URL_VAR: &str = "FLUXORA_BACKEND_URL";
pub const MAP_TOKEN_VAR: &str = "MAPBOX_ACCESS_TOKEN";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Placeholder value shipped in example env files; treated as missing.
const PLACEHOLDER_TOKEN: &str = "your-mapbox-token-here";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend_url: String,
    pub map_access_token: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingMapToken,
    PlaceholderMapToken,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingMapToken => {
                write!(f, "{} is not set; map rendering requires an access token", MAP_TOKEN_VAR)
            }
            ConfigError::PlaceholderMapToken => {
                write!(f, "{} still holds the placeholder value", MAP_TOKEN_VAR)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// Build a config from explicit values, validating the token.
    pub fn new(backend_url: impl Into<String>, map_access_token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = map_access_token.into();
        validate_token(&token)?;
        Ok(Self {
            backend_url: backend_url.into(),
            map_access_token: token,
            request_timeout_secs: 10,
        })
    }

    /// Read the config from the environment. The backend URL falls back to
    /// the local dev default; the token has no fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url =
            env::var(BACKEND_URL_VAR).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let token = env::var(MAP_TOKEN_VAR).map_err(|_| ConfigError::MissingMapToken)?;
        Self::new(backend_url, token)
    }
}

fn validate_token(token: &str) -> Result<(), ConfigError> {
    if token.trim().is_empty() {
        return Err(ConfigError::MissingMapToken);
    }
    if token == PLACEHOLDER_TOKEN {
        return Err(ConfigError::PlaceholderMapToken);
    }
    Ok(())
}
