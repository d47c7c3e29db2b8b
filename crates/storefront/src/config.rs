//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Credential
//! - `GEMINI_API_KEY` - Gemini API key (falls back to `API_KEY`). A missing or
//!   placeholder key does not stop the server from starting; the catalog
//!   load fails instead and the shop shows its fatal error state.
//!
//! ## Optional
//! - `GEMINI_MODEL` - Model name (default: gemini-2.5-flash)
//! - `GEMINI_API_BASE` - API base URL (default: <https://generativelanguage.googleapis.com/v1beta>)
//! - `STORE_HOST` - Bind address (default: 127.0.0.1)
//! - `STORE_PORT` - Listen port (default: 3000)
//! - `STORE_NOTICE_MS` - How long notices stay visible (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_NOTICE_MS: &str = "3000";

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
    "insert",
    "put-your",
    "add-your",
];

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
pub struct StoreConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// How long a notice stays visible before it is dismissed
    pub notice_duration: Duration,
    /// Gemini API configuration
    pub gemini: GeminiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Gemini API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key; `None` when unset or obviously a placeholder
    pub api_key: Option<SecretString>,
    /// Model used for catalog generation
    pub model: String,
    /// Base URL of the Generative Language API
    pub api_base: Url,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("model", &self.model)
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = env_or_default(&lookup, "STORE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_HOST".to_string(), e.to_string()))?;
        let port = env_or_default(&lookup, "STORE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_PORT".to_string(), e.to_string()))?;
        let notice_ms = env_or_default(&lookup, "STORE_NOTICE_MS", DEFAULT_NOTICE_MS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STORE_NOTICE_MS".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            notice_duration: Duration::from_millis(notice_ms),
            gemini: GeminiConfig::from_lookup(&lookup)?,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl GeminiConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = env_or_default(lookup, "GEMINI_API_BASE", DEFAULT_API_BASE);
        let api_base = Url::parse(&api_base)
            .map_err(|e| ConfigError::InvalidEnvVar("GEMINI_API_BASE".to_string(), e.to_string()))?;

        Ok(Self {
            api_key: get_api_key(lookup),
            model: env_or_default(lookup, "GEMINI_MODEL", DEFAULT_MODEL),
            api_base,
        })
    }

    /// Returns the credential or the error the catalog load should report.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when no usable key was configured.
    pub fn require_api_key(&self) -> Result<&SecretString, ConfigError> {
        self.api_key
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn env_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Get the API key with fallback to the generic `API_KEY`.
///
/// Empty and placeholder values are treated as absent.
fn get_api_key<F>(lookup: &F) -> Option<SecretString>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY"))?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Some(pattern) = placeholder_pattern(value) {
        tracing::warn!(pattern, "GEMINI_API_KEY looks like a placeholder, ignoring it");
        return None;
    }
    Some(SecretString::from(value.to_string()))
}

/// Returns the first placeholder pattern the value contains, if any.
fn placeholder_pattern(value: &str) -> Option<&'static str> {
    let lower = value.to_lowercase();
    PLACEHOLDER_PATTERNS
        .iter()
        .copied()
        .find(|pattern| lower.contains(pattern))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.notice_duration, Duration::from_millis(3000));
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(
            config.gemini.api_base.as_str(),
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert!(config.gemini.api_key.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_api_key_fallback() {
        let config =
            StoreConfig::from_lookup(lookup_from(&[("API_KEY", "AIzaSyD4x9Qk2mNw")])).unwrap();
        assert_eq!(
            config.gemini.require_api_key().unwrap().expose_secret(),
            "AIzaSyD4x9Qk2mNw"
        );
    }

    #[test]
    fn test_primary_api_key_wins() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "AIzaPrimary7"),
            ("API_KEY", "AIzaFallback3"),
        ]))
        .unwrap();
        assert_eq!(
            config.gemini.api_key.unwrap().expose_secret(),
            "AIzaPrimary7"
        );
    }

    #[test]
    fn test_placeholder_api_key_is_treated_as_missing() {
        let config =
            StoreConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "your-api-key-here")]))
                .unwrap();
        assert!(config.gemini.api_key.is_none());
        assert!(matches!(
            config.gemini.require_api_key(),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn test_invalid_port() {
        let result = StoreConfig::from_lookup(lookup_from(&[("STORE_PORT", "eighty")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "STORE_PORT"));
    }

    #[test]
    fn test_invalid_api_base() {
        let result = StoreConfig::from_lookup(lookup_from(&[("GEMINI_API_BASE", "not a url")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_gemini_config_debug_redacts_key() {
        let config = StoreConfig::from_lookup(lookup_from(&[(
            "GEMINI_API_KEY",
            "AIzaSuperSecretValue9",
        )]))
        .unwrap();

        let debug_output = format!("{:?}", config.gemini);

        assert!(debug_output.contains("gemini-2.5-flash"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("AIzaSuperSecretValue9"));
    }
}
