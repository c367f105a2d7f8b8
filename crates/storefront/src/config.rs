//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPFRONT_BACKEND_URL` - Base URL of the shop backend (e.g. `https://api.shop.test`)
//!
//! ## Optional
//! - `SHOPFRONT_TOKEN_PATH` - File holding the persisted session token
//!   (default: `$HOME/.shopfront/token`)
//! - `SHOPFRONT_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const TOKEN_FILE_NAME: &str = "token";
const TOKEN_DIR_NAME: &str = ".shopfront";
const FALLBACK_TOKEN_PATH: &str = ".shopfront-token";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend base URL; API paths are joined onto it.
    pub backend_url: Url,
    /// Where the session token is persisted between runs.
    pub token_path: PathBuf,
    /// Timeout applied to every backend request.
    pub request_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend_url = parse_backend_url(&get_required_env("SHOPFRONT_BACKEND_URL")?)?;
        let token_path = get_optional_env("SHOPFRONT_TOKEN_PATH")
            .map_or_else(default_token_path, PathBuf::from);
        let timeout_secs = get_env_or_default(
            "SHOPFRONT_HTTP_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPFRONT_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            backend_url,
            token_path,
            request_timeout: Duration::from_secs(timeout_secs),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration pointing at `backend_url` with defaults for everything else.
    #[must_use]
    pub fn for_backend(mut backend_url: Url) -> Self {
        ensure_trailing_slash(&mut backend_url);
        Self {
            backend_url,
            token_path: default_token_path(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the backend URL, normalising it to end with a slash so that
/// `Url::join` appends API paths instead of replacing the last segment.
fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid =
        |reason: String| ConfigError::InvalidEnvVar("SHOPFRONT_BACKEND_URL".into(), reason);

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    ensure_trailing_slash(&mut url);
    Ok(url)
}

fn ensure_trailing_slash(url: &mut Url) {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
}

fn default_token_path() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(FALLBACK_TOKEN_PATH),
        |home| PathBuf::from(home).join(TOKEN_DIR_NAME).join(TOKEN_FILE_NAME),
    )
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_url_gets_trailing_slash() {
        let url = parse_backend_url("http://localhost:4000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/");

        let nested = parse_backend_url("https://shop.test/backend").unwrap();
        assert_eq!(
            nested.join("api/product/list").unwrap().as_str(),
            "https://shop.test/backend/api/product/list"
        );
    }

    #[test]
    fn test_backend_url_rejects_garbage() {
        assert!(matches!(
            parse_backend_url("not a url"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            parse_backend_url("ftp://shop.test"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_for_backend_defaults() {
        let config = StorefrontConfig::for_backend(Url::parse("http://localhost:4000/shop").unwrap());
        assert_eq!(config.backend_url.as_str(), "http://localhost:4000/shop/");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.sentry_dsn.is_none());
        assert!(
            config.token_path.ends_with(TOKEN_FILE_NAME)
                || config.token_path.ends_with(FALLBACK_TOKEN_PATH)
        );
    }
}
