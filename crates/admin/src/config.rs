//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_SHOP` - Shopify store domain (e.g., your-store.myshopify.com)
//!
//! ## Optional
//! - `SHOPIFY_ACCESS_TOKEN` - Admin API access token. Without it every store
//!   call fails as unauthorized.
//! - `SHOPIFY_API_VERSION` - API version (default: 2023-07)
//! - `WHOLESALE_METAFIELD_KEY` - Policy metafield key in the `wholesale`
//!   namespace (default: bulk)
//! - `WHOLESALE_PAGE_SIZE` - Products fetched per list (default: 10, max 250)
//! - `WHOLESALE_HOST` - Bind address (default: 127.0.0.1)
//! - `WHOLESALE_PORT` - Listen port (default: 3000)
//! - `WHOLESALE_LOCALE` - Operator UI language, `ar` or `en` (default: ar)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sentry sampling

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use wholesale_core::MetafieldKey;

use crate::i18n::Locale;

const DEFAULT_API_VERSION: &str = "2023-07";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 250;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
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

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Admin API configuration
    pub shopify: ShopifyAdminConfig,
    /// Number of products fetched for the list views
    pub page_size: i64,
    /// Language of operator-facing pages and messages
    pub locale: Locale,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Shopify Admin API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyAdminConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2023-07)
    pub api_version: String,
    /// Admin API access token, if one has been issued
    pub access_token: Option<SecretString>,
    /// Where the wholesale policy metafield lives
    pub metafield_key: MetafieldKey,
}

impl std::fmt::Debug for ShopifyAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyAdminConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("metafield_key", &self.metafield_key)
            .finish()
    }
}

impl ShopifyAdminConfig {
    /// Configuration for `store` with default version and key, and no token.
    #[must_use]
    pub fn new(store: impl Into<String>) -> Self {
        Self {
            store: store.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token: None,
            metafield_key: MetafieldKey::default(),
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let access_token = get_optional_env("SHOPIFY_ACCESS_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from);

        match &access_token {
            Some(token) => warn_if_weak_secret(token.expose_secret(), "SHOPIFY_ACCESS_TOKEN"),
            None => tracing::warn!(
                "SHOPIFY_ACCESS_TOKEN is not set; store requests will be rejected as unauthorized"
            ),
        }

        Ok(Self {
            store: get_required_env("SHOPIFY_SHOP")?,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            access_token,
            metafield_key: parse_metafield_key(&get_env_or_default(
                "WHOLESALE_METAFIELD_KEY",
                MetafieldKey::default().key(),
            ))?,
        })
    }
}

impl AdminConfig {
    /// Configuration with default server settings for the given store.
    #[must_use]
    pub const fn new(shopify: ShopifyAdminConfig) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            shopify,
            page_size: DEFAULT_PAGE_SIZE,
            locale: Locale::Ar,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

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

        let host = get_env_or_default("WHOLESALE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("WHOLESALE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("WHOLESALE_PORT", &DEFAULT_PORT.to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("WHOLESALE_PORT".to_string(), e.to_string()))?;
        let page_size = parse_page_size(&get_env_or_default(
            "WHOLESALE_PAGE_SIZE",
            &DEFAULT_PAGE_SIZE.to_string(),
        ))?;
        let locale = get_env_or_default("WHOLESALE_LOCALE", Locale::Ar.code())
            .parse::<Locale>()
            .map_err(|e| ConfigError::InvalidEnvVar("WHOLESALE_LOCALE".to_string(), e))?;

        let shopify = ShopifyAdminConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            shopify,
            page_size,
            locale,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helpers
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

fn parse_page_size(raw: &str) -> Result<i64, ConfigError> {
    let invalid =
        |reason: String| ConfigError::InvalidEnvVar("WHOLESALE_PAGE_SIZE".to_string(), reason);
    let size = raw
        .trim()
        .parse::<i64>()
        .map_err(|e| invalid(e.to_string()))?;
    if !(1..=MAX_PAGE_SIZE).contains(&size) {
        return Err(invalid(format!(
            "must be between 1 and {MAX_PAGE_SIZE} (got {size})"
        )));
    }
    Ok(size)
}

fn parse_metafield_key(raw: &str) -> Result<MetafieldKey, ConfigError> {
    let key = raw.trim();
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(ConfigError::InvalidEnvVar(
            "WHOLESALE_METAFIELD_KEY".to_string(),
            format!("'{raw}' is not a valid metafield key"),
        ));
    }
    Ok(MetafieldKey::new(key))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Check that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

/// Access tokens are issued by Shopify, so a weak one is reported, not rejected.
fn warn_if_weak_secret(secret: &str, var_name: &str) {
    if let Err(e) = validate_secret_strength(secret, var_name) {
        tracing::warn!("{e}");
    }
}
