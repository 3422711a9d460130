//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (used in the sitemap)
//! - `BACKEND_API_URL` - Base URL of the REST backend (e.g. `https://api.example.com/api/`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `BACKEND_ASSET_URL` - Base URL for relative image paths (default: API origin + `/storage/`)
//! - `BACKEND_API_TOKEN` - Bearer token sent with every backend request
//! - `BACKEND_TIMEOUT_SECS` - Backend request timeout (default: 10)
//! - `DEFAULT_LOCALE` - `ar` or `en` (default: ar)
//! - `STORE_CURRENCY` - ISO 4217 code (default: SAR)
//! - `CATALOG_CACHE_TTL_SECS` - Catalog cache lifetime (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use bazaar_core::{CurrencyCode, Locale};
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// REST backend configuration
    pub backend: BackendConfig,
    /// Locale used when neither the session nor the browser picks one
    pub default_locale: Locale,
    /// Currency every price is shown in
    pub currency: CurrencyCode,
    /// Lifetime of cached catalog responses
    pub cache_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

/// REST backend configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct BackendConfig {
    /// API base URL, always ending in `/`
    pub api_url: Url,
    /// Base URL for relative image paths, always ending in `/`
    pub asset_url: Url,
    /// Optional bearer token
    pub api_token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("api_url", &self.api_url.as_str())
            .field("asset_url", &self.asset_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
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

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = parse_env("STOREFRONT_PORT", 3000u16)?;
        let base_url = parse_url("STOREFRONT_BASE_URL", &get_required_env("STOREFRONT_BASE_URL")?)?;
        let backend = BackendConfig::from_env()?;
        let default_locale = parse_env("DEFAULT_LOCALE", Locale::Ar)?;
        let currency = parse_env("STORE_CURRENCY", CurrencyCode::SAR)?;
        let cache_ttl = Duration::from_secs(parse_env("CATALOG_CACHE_TTL_SECS", 300u64)?);

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);

        Ok(Self {
            host,
            port,
            base_url,
            backend,
            default_locale,
            currency,
            cache_ttl,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Config for a storefront at `base_url` reading from `api_url`, defaults elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if either URL cannot be parsed.
    pub fn for_urls(base_url: &str, api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: parse_url("STOREFRONT_BASE_URL", base_url)?,
            backend: BackendConfig::for_url(api_url)?,
            default_locale: Locale::Ar,
            currency: CurrencyCode::SAR,
            cache_ttl: Duration::from_secs(300),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should be marked `Secure`.
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_url = parse_url("BACKEND_API_URL", &get_required_env("BACKEND_API_URL")?)?;
        let asset_url = match get_optional_env("BACKEND_ASSET_URL") {
            Some(raw) => parse_url("BACKEND_ASSET_URL", &raw)?,
            None => default_asset_url(&api_url),
        };
        let api_token = get_optional_env("BACKEND_API_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .map(SecretString::from);
        let timeout = Duration::from_secs(parse_env("BACKEND_TIMEOUT_SECS", 10u64)?);

        Ok(Self {
            api_url,
            asset_url,
            api_token,
            timeout,
        })
    }

    /// Build a config for a backend at `api_url` with defaults for everything else.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL cannot be parsed.
    pub fn for_url(api_url: &str) -> Result<Self, ConfigError> {
        let api_url = parse_url("BACKEND_API_URL", api_url)?;
        Ok(Self {
            asset_url: default_asset_url(&api_url),
            api_url,
            api_token: None,
            timeout: Duration::from_secs(10),
        })
    }

    /// Resolve an image reference from the backend to an absolute URL.
    ///
    /// Absolute URLs pass through; relative paths are joined to the asset base.
    #[must_use]
    pub fn resolve_image(&self, path: &str) -> Option<String> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        self.asset_url
            .join(path.trim_start_matches('/'))
            .ok()
            .map(String::from)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an optional environment variable, using `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

/// Parse a URL and make sure it ends with `/` so relative joins append.
fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// API origin + `/storage/`, where uploaded images are served.
fn default_asset_url(api_url: &Url) -> Url {
    let mut url = api_url.clone();
    url.set_path("/storage/");
    url.set_query(None);
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_appends_trailing_slash() {
        let url = parse_url("X", "https://api.example.com/api").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/");
        assert_eq!(url.join("products").unwrap().as_str(), "https://api.example.com/api/products");
    }

    #[test]
    fn test_parse_url_rejects_garbage() {
        let err = parse_url("BACKEND_API_URL", "not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "BACKEND_API_URL"));
    }

    #[test]
    fn test_default_asset_url_uses_origin() {
        let backend = BackendConfig::for_url("https://api.example.com/api/v1").unwrap();
        assert_eq!(backend.asset_url.as_str(), "https://api.example.com/storage/");
    }

    #[test]
    fn test_resolve_image() {
        let backend = BackendConfig::for_url("https://api.example.com/api").unwrap();
        assert_eq!(
            backend.resolve_image("/products/oud.jpg").as_deref(),
            Some("https://api.example.com/storage/products/oud.jpg")
        );
        assert_eq!(
            backend.resolve_image("https://cdn.example.com/a.png").as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(backend.resolve_image("  "), None);
    }

    #[test]
    fn test_backend_config_debug_redacts_token() {
        let mut backend = BackendConfig::for_url("https://api.example.com/").unwrap();
        backend.api_token = Some(SecretString::from("super_secret_token"));
        let debug_output = format!("{backend:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}
