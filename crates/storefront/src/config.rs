//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Upstream store (optional as a group)
//! - `WOOCOMMERCE_URL` - Store base URL (e.g., <https://shop.example.com>)
//! - `WOOCOMMERCE_CONSUMER_KEY` - REST API consumer key
//! - `WOOCOMMERCE_CONSUMER_SECRET` - REST API consumer secret
//!
//! If any of the three is missing the catalog runs without an upstream and
//! serves empty lists.
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_LOG_JSON` - Emit JSON logs (default: false)
//! - `WOOCOMMERCE_TIMEOUT_SECS` - Upstream request timeout (default: 15)
//! - `CATALOG_CACHE_TTL_SECS` - Category/product snapshot TTL (default: 300)
//! - `CATALOG_PAGE_SIZE` - Records requested per upstream page (default: 100)
//! - `CATALOG_CATEGORY_MAX_PAGES` - Category page cap (default: 5)
//! - `CATALOG_PRODUCT_MAX_PAGES` - Product page cap (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Emit logs as JSON lines instead of the human-readable format
    pub log_json: bool,
    /// Upstream store credentials, `None` when not configured
    pub woocommerce: Option<WooCommerceConfig>,
    /// Catalog cache and pagination settings
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., production)
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// WooCommerce REST API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct WooCommerceConfig {
    /// Store base URL without the `/wp-json` suffix
    pub base_url: String,
    /// REST API consumer key
    pub consumer_key: String,
    /// REST API consumer secret
    pub consumer_secret: SecretString,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for WooCommerceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooCommerceConfig")
            .field("base_url", &self.base_url)
            .field("consumer_key", &"[REDACTED]")
            .field("consumer_secret", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Catalog snapshot cache and upstream pagination settings.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// How long a category or product snapshot is served before refetching
    pub cache_ttl: Duration,
    /// Records requested per upstream page
    pub page_size: u32,
    /// Maximum category pages fetched per refresh
    pub category_max_pages: u32,
    /// Maximum product pages fetched per refresh
    pub product_max_pages: u32,
    /// Pause before retrying a failed page
    pub retry_delay: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(300),
            page_size: 100,
            category_max_pages: 5,
            product_max_pages: 10,
            retry_delay: Duration::from_millis(250),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if the
    /// consumer secret looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("STOREFRONT_PORT", "3000")?;
        let log_json = parse_env_or_default::<bool>("STOREFRONT_LOG_JSON", "false")?;

        let woocommerce = WooCommerceConfig::from_env()?;
        let catalog = CatalogConfig::from_env()?;

        Ok(Self {
            host,
            port,
            log_json,
            woocommerce,
            catalog,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl WooCommerceConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let (Some(base_url), Some(consumer_key), Some(consumer_secret)) = (
            get_optional_env("WOOCOMMERCE_URL"),
            get_optional_env("WOOCOMMERCE_CONSUMER_KEY"),
            get_optional_env("WOOCOMMERCE_CONSUMER_SECRET"),
        ) else {
            return Ok(None);
        };

        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("WOOCOMMERCE_URL".to_string(), e.to_string())
        })?;
        validate_secret_strength(&consumer_secret, "WOOCOMMERCE_CONSUMER_SECRET")?;

        let timeout_secs = parse_env_or_default::<u64>("WOOCOMMERCE_TIMEOUT_SECS", "15")?;

        Ok(Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            consumer_key,
            consumer_secret: SecretString::from(consumer_secret),
            timeout: Duration::from_secs(timeout_secs),
        }))
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let page_size = parse_env_or_default::<u32>("CATALOG_PAGE_SIZE", "100")?;
        if page_size == 0 || page_size > 100 {
            // The upstream rejects per_page above 100.
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_PAGE_SIZE".to_string(),
                format!("must be between 1 and 100 (got {page_size})"),
            ));
        }

        Ok(Self {
            cache_ttl: Duration::from_secs(parse_env_or_default("CATALOG_CACHE_TTL_SECS", "300")?),
            page_size,
            category_max_pages: parse_env_or_default("CATALOG_CATEGORY_MAX_PAGES", "5")?,
            product_max_pages: parse_env_or_default("CATALOG_PRODUCT_MAX_PAGES", "10")?,
            retry_delay: defaults.retry_delay,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
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
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
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

    // Real consumer secrets (cs_ followed by 40 hex chars) sit well above this
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Copy the key pair from WooCommerce > Settings > Advanced > REST API."
            ),
        ));
    }

    Ok(())
}
