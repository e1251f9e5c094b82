//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional. A storefront without Telegram or Nova Poshta
//! settings still starts; the routes that need them answer with a
//! configuration error.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STORE_NAME` - Shop name used in order notifications (default: Сад Олега)
//! - `CATALOG_PATH` - JSON product list replacing the built-in catalog
//! - `TELEGRAM_BOT_TOKEN` - Bot token for order notifications
//! - `TELEGRAM_CHAT_ID` - Chat receiving order notifications (set with the token)
//! - `TELEGRAM_API_URL` - Bot API base URL (default: <https://api.telegram.org>)
//! - `NOVA_POST_TOKEN` - Nova Poshta API key
//! - `NOVA_POST_API_URL` - Nova Poshta JSON endpoint (default: <https://api.novaposhta.ua/v2.0/json/>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

const DEFAULT_STORE_NAME: &str = "Сад Олега";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_NOVA_POSHTA_API_URL: &str = "https://api.novaposhta.ua/v2.0/json/";

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
    /// Shop name shown in order notifications
    pub store_name: String,
    /// Catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Order notifications, `None` when not configured
    pub telegram: Option<TelegramConfig>,
    /// Address lookups, `None` when not configured
    pub nova_poshta: Option<NovaPoshtaConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

/// Telegram Bot API settings.
///
/// Implements `Debug` manually to redact the bot token.
#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: SecretString,
    pub chat_id: String,
    pub api_url: Url,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

/// Nova Poshta API settings.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct NovaPoshtaConfig {
    pub api_key: SecretString,
    pub api_url: Url,
}

impl std::fmt::Debug for NovaPoshtaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NovaPoshtaConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

impl Default for StorefrontConfig {
    /// Local defaults with no integrations configured.
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            store_name: DEFAULT_STORE_NAME.to_string(),
            catalog_path: None,
            telegram: None,
            nova_poshta: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
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
    /// Returns `ConfigError` if a variable is malformed, a Telegram token or
    /// chat id is set without the other, or a secret fails validation
    /// (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(&EnvVars(|key: &str| std::env::var(key).ok()))
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_vars<F>(vars: &EnvVars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = vars
            .get_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = vars
            .get_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            store_name: vars.get_or_default("STORE_NAME", DEFAULT_STORE_NAME),
            catalog_path: vars.get_optional("CATALOG_PATH").map(PathBuf::from),
            telegram: TelegramConfig::from_vars(vars)?,
            nova_poshta: NovaPoshtaConfig::from_vars(vars)?,
            sentry_dsn: vars.get_optional("SENTRY_DSN"),
            sentry_environment: vars.get_optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: vars.get_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: vars.get_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl TelegramConfig {
    fn from_vars<F>(vars: &EnvVars<F>) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = vars.get_optional("TELEGRAM_BOT_TOKEN");
        let chat_id = vars.get_optional("TELEGRAM_CHAT_ID");

        let (token, chat_id) = match (token, chat_id) {
            (None, None) => return Ok(None),
            (Some(token), Some(chat_id)) => (token, chat_id),
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar("TELEGRAM_CHAT_ID".to_string()));
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar(
                    "TELEGRAM_BOT_TOKEN".to_string(),
                ));
            }
        };

        validate_secret_strength(&token, "TELEGRAM_BOT_TOKEN")?;

        Ok(Some(Self {
            bot_token: SecretString::from(token),
            chat_id,
            api_url: vars.get_url("TELEGRAM_API_URL", DEFAULT_TELEGRAM_API_URL)?,
        }))
    }
}

impl NovaPoshtaConfig {
    fn from_vars<F>(vars: &EnvVars<F>) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(api_key) = vars.get_optional("NOVA_POST_TOKEN") else {
            return Ok(None);
        };
        validate_secret_strength(&api_key, "NOVA_POST_TOKEN")?;

        Ok(Some(Self {
            api_key: SecretString::from(api_key),
            api_url: vars.get_url("NOVA_POST_API_URL", DEFAULT_NOVA_POSHTA_API_URL)?,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Source of configuration variables.
///
/// Wraps a lookup function so configuration can be loaded from the process
/// environment or from a fixed map in tests.
pub struct EnvVars<F>(pub F);

impl<F> EnvVars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable; empty values count as unset.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }

    fn get_url(&self, key: &str, default: &str) -> Result<Url, ConfigError> {
        Url::parse(&self.get_or_default(key, default))
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    fn get_rate(&self, key: &str, default: f32) -> Result<f32, ConfigError> {
        let Some(raw) = self.get_optional(key) else {
            return Ok(default);
        };
        let rate = raw
            .parse::<f32>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
        if (0.0..=1.0).contains(&rate) {
            Ok(rate)
        } else {
            Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("must be between 0 and 1 (got {rate})"),
            ))
        }
    }
}

impl EnvVars<Box<dyn Fn(&str) -> Option<String>>> {
    /// Variables from a fixed list of pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self(Box::new(move |key| map.get(key).cloned()))
    }
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

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the key issued by the provider."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    const BOT_TOKEN: &str = "7012345678:AAHk3vQx9Lm2PzR8tYw4NcJ6bUe1FsD0gKo";
    const NP_KEY: &str = "9f3c2a71d4e85b60a1c7e2f94d38b5a6";

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_real_looking_keys_pass() {
        assert!(validate_secret_strength(BOT_TOKEN, "TELEGRAM_BOT_TOKEN").is_ok());
        assert!(validate_secret_strength(NP_KEY, "NOVA_POST_TOKEN").is_ok());
    }

    #[test]
    fn test_placeholder_rejected() {
        let result = validate_secret_strength("your-bot-token-here", "TELEGRAM_BOT_TOKEN");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_low_entropy_rejected() {
        let result = validate_secret_strength("aaaaaaaabbbbbbbb", "NOVA_POST_TOKEN");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = StorefrontConfig::from_vars(&EnvVars::from_pairs(&[])).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.store_name, "Сад Олега");
        assert!(config.telegram.is_none());
        assert!(config.nova_poshta.is_none());
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_full_configuration() {
        let vars = EnvVars::from_pairs(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("CATALOG_PATH", "/srv/catalog.json"),
            ("TELEGRAM_BOT_TOKEN", BOT_TOKEN),
            ("TELEGRAM_CHAT_ID", "-1001234567890"),
            ("NOVA_POST_TOKEN", NP_KEY),
            ("NOVA_POST_API_URL", "http://127.0.0.1:9000/np"),
            ("SENTRY_TRACES_SAMPLE_RATE", "0.25"),
        ]);
        let config = StorefrontConfig::from_vars(&vars).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/catalog.json")));
        let telegram = config.telegram.unwrap();
        assert_eq!(telegram.chat_id, "-1001234567890");
        assert_eq!(telegram.api_url.as_str(), "https://api.telegram.org/");
        assert_eq!(telegram.bot_token.expose_secret(), BOT_TOKEN);
        assert_eq!(
            config.nova_poshta.unwrap().api_url.as_str(),
            "http://127.0.0.1:9000/np"
        );
        assert!((config.sentry_traces_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_telegram_token_without_chat_rejected() {
        let vars = EnvVars::from_pairs(&[("TELEGRAM_BOT_TOKEN", BOT_TOKEN)]);
        assert!(matches!(
            StorefrontConfig::from_vars(&vars),
            Err(ConfigError::MissingEnvVar(var)) if var == "TELEGRAM_CHAT_ID"
        ));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let vars = EnvVars::from_pairs(&[("STOREFRONT_PORT", "http")]);
        assert!(matches!(
            StorefrontConfig::from_vars(&vars),
            Err(ConfigError::InvalidEnvVar(var, _)) if var == "STOREFRONT_PORT"
        ));
    }

    #[test]
    fn test_sample_rate_out_of_range_rejected() {
        let vars = EnvVars::from_pairs(&[("SENTRY_SAMPLE_RATE", "1.5")]);
        assert!(StorefrontConfig::from_vars(&vars).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let vars = EnvVars::from_pairs(&[
            ("TELEGRAM_BOT_TOKEN", BOT_TOKEN),
            ("TELEGRAM_CHAT_ID", "42"),
            ("NOVA_POST_TOKEN", NP_KEY),
        ]);
        let config = StorefrontConfig::from_vars(&vars).unwrap();
        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("[REDACTED]"));
        assert!(debug_output.contains("42"));
        assert!(!debug_output.contains(BOT_TOKEN));
        assert!(!debug_output.contains(NP_KEY));
    }
}
