//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPFRONT_API_URL` - Base URL of the storefront REST API
//!
//! ## Optional
//! - `SHOPFRONT_API_TOKEN` - Bearer token sent as `Authorization` header
//! - `SHOPFRONT_API_TIMEOUT_SECS` - Request timeout (default: transport default)
//! - `SHOPFRONT_STATE_PATH` - Selection file (default: .shopfront/selection.json)
//! - `SHOPFRONT_USER_AGENT` - User agent (default: Shopfront/<version>)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_STATE_PATH: &str = ".shopfront/selection.json";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront API client configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is joined onto
    pub base_url: Url,
    /// Bearer token for authenticated calls
    pub api_token: Option<SecretString>,
    /// Request timeout; `None` leaves the transport default in place
    pub timeout: Option<Duration>,
    /// Where the selected-address file lives
    pub state_path: PathBuf,
    /// User agent sent with every request
    pub user_agent: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("state_path", &self.state_path)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Build a configuration for `base_url` with every optional setting at its default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("SHOPFRONT_API_URL", base_url)?,
            api_token: None,
            timeout: None,
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            user_agent: default_user_agent(),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if the API token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(
            "SHOPFRONT_API_URL",
            &get_required_env("SHOPFRONT_API_URL")?,
        )?;

        let api_token = get_optional_env("SHOPFRONT_API_TOKEN")
            .map(|token| {
                validate_token("SHOPFRONT_API_TOKEN", &token)?;
                Ok::<_, ConfigError>(SecretString::from(token))
            })
            .transpose()?;

        let timeout = get_optional_env("SHOPFRONT_API_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "SHOPFRONT_API_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        let state_path = PathBuf::from(get_env_or_default(
            "SHOPFRONT_STATE_PATH",
            DEFAULT_STATE_PATH,
        ));
        let user_agent = get_optional_env("SHOPFRONT_USER_AGENT").unwrap_or_else(default_user_agent);

        Ok(Self {
            base_url,
            api_token,
            timeout,
            state_path,
            user_agent,
        })
    }

    /// Replace the API token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(SecretString::from(token.into()));
        self
    }

    /// Expose the token for header injection.
    pub(crate) fn bearer(&self) -> Option<String> {
        self.api_token
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_user_agent() -> String {
    format!("Shopfront/{}", env!("CARGO_PKG_VERSION"))
}

/// Parse a base URL, making sure relative endpoint paths join beneath it.
fn parse_base_url(var_name: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must be an absolute http(s) URL".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Reject tokens copied verbatim from a sample `.env`.
fn validate_token(var_name: &str, token: &str) -> Result<(), ConfigError> {
    let lower = token.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}
