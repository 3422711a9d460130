//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_BASE_URL` - Public URL for the dashboard
//! - `BACKEND_API_URL` - Base URL of the REST backend
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `BACKEND_ASSET_URL` - Base URL for relative image paths
//! - `BACKEND_TIMEOUT_SECS` - Backend request timeout (default: 15)
//! - `DEFAULT_LOCALE` - `ar` or `en` (default: ar)
//! - `STORE_CURRENCY` - ISO 4217 code (default: SAR)
//! - `ADMIN_PAGE_SIZE` - Rows per listing page (default: 25)
//! - `LOW_STOCK_THRESHOLD` - Stock at or below which a product is flagged (default: 5)
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use bazaar_core::{CurrencyCode, Locale};
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

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Public base URL for the dashboard
    pub base_url: Url,
    /// Backend API base URL, always ending in `/`
    pub api_url: Url,
    /// Base URL for relative image paths, always ending in `/`
    pub asset_url: Url,
    pub timeout: Duration,
    pub default_locale: Locale,
    pub currency: CurrencyCode,
    /// Rows shown per listing page
    pub page_size: usize,
    /// Products with stock at or below this show on the dashboard
    pub low_stock_threshold: i64,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let api_url = parse_url("BACKEND_API_URL", &get_required_env("BACKEND_API_URL")?)?;
        let asset_url = match get_optional_env("BACKEND_ASSET_URL") {
            Some(raw) => parse_url("BACKEND_ASSET_URL", &raw)?,
            None => default_asset_url(&api_url),
        };

        Ok(Self {
            host,
            port: parse_env("ADMIN_PORT", 3001u16)?,
            base_url: parse_url("ADMIN_BASE_URL", &get_required_env("ADMIN_BASE_URL")?)?,
            api_url,
            asset_url,
            timeout: Duration::from_secs(parse_env("BACKEND_TIMEOUT_SECS", 15u64)?),
            default_locale: parse_env("DEFAULT_LOCALE", Locale::Ar)?,
            currency: parse_env("STORE_CURRENCY", CurrencyCode::SAR)?,
            page_size: parse_env("ADMIN_PAGE_SIZE", 25usize)?.max(1),
            low_stock_threshold: parse_env("LOW_STOCK_THRESHOLD", 5i64)?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_optional_env("SENTRY_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
            sentry_traces_sample_rate: get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.1),
        })
    }

    /// Config for a dashboard at `base_url` talking to `api_url`, defaults elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if either URL cannot be parsed.
    pub fn for_urls(base_url: &str, api_url: &str) -> Result<Self, ConfigError> {
        let api_url = parse_url("BACKEND_API_URL", api_url)?;
        Ok(Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3001,
            base_url: parse_url("ADMIN_BASE_URL", base_url)?,
            asset_url: default_asset_url(&api_url),
            api_url,
            timeout: Duration::from_secs(15),
            default_locale: Locale::Ar,
            currency: CurrencyCode::SAR,
            page_size: 25,
            low_stock_threshold: 5,
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

    /// Absolute URL for an image reference from the backend.
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

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

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
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

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
    fn test_for_urls_defaults() {
        let config =
            AdminConfig::for_urls("http://127.0.0.1:3001", "http://127.0.0.1:8000/api").unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:8000/api/");
        assert_eq!(config.asset_url.as_str(), "http://127.0.0.1:8000/storage/");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.low_stock_threshold, 5);
        assert!(!config.is_https());
    }

    #[test]
    fn test_resolve_image() {
        let config = AdminConfig::for_urls("https://admin.example.com", "https://api.example.com/api")
            .unwrap();
        assert!(config.is_https());
        assert_eq!(
            config.resolve_image("products/a.jpg").as_deref(),
            Some("https://api.example.com/storage/products/a.jpg")
        );
        assert_eq!(config.resolve_image(""), None);
    }
}
