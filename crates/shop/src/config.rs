//! Shop configuration loaded from environment variables.
//!
//! Every variable is optional; the defaults are the shop's live payee
//! details and WhatsApp number.
//!
//! # Environment Variables
//!
//! - `GWD_WHATSAPP_NUMBER` - Order recipient in international format (default: 254714396527)
//! - `GWD_MPESA_TILL` - MPesa Buy Goods till number (default: 3721190)
//! - `GWD_BANK_NAME` - Bank for transfers (default: Equity Bank)
//! - `GWD_BANK_ACCOUNT_NAME` - Account holder name
//! - `GWD_BANK_ACCOUNT_NUMBER` - Account number, digits only
//! - `GWD_MENU_PATH` - YAML menu file (default: built-in menu)
//! - `GWD_CACHE_DIR` - Offline cache directory (default: .gwd-cache, `off` disables)
//! - `GWD_OPEN_BROWSER` - Open WhatsApp links in a browser (default: true)
//! - `GWD_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate between 0.0 and 1.0 (default: 1.0)

use std::path::PathBuf;

use grizzly_core::{CheckoutSettings, PaymentDetails, Recipient};
use thiserror::Error;

const DEFAULT_CACHE_DIR: &str = ".gwd-cache";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Shop application configuration.
#[derive(Clone)]
pub struct ShopConfig {
    /// WhatsApp number that receives orders
    pub recipient: Recipient,
    /// Payee details quoted in payment instructions
    pub payment: PaymentDetails,
    /// Menu file overriding the built-in menu
    pub menu_path: Option<PathBuf>,
    /// Offline cache directory, `None` when registration is disabled
    pub cache_dir: Option<PathBuf>,
    /// Whether to open handoff links in a browser
    pub open_browser: bool,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error event sample rate
    pub sentry_sample_rate: f32,
}

impl std::fmt::Debug for ShopConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopConfig")
            .field("recipient", &self.recipient)
            .field("payment", &self.payment)
            .field("menu_path", &self.menu_path)
            .field("cache_dir", &self.cache_dir)
            .field("open_browser", &self.open_browser)
            .field("log_format", &self.log_format)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .field("sentry_sample_rate", &self.sentry_sample_rate)
            .finish()
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            recipient: Recipient::default(),
            payment: PaymentDetails::default(),
            menu_path: None,
            cache_dir: Some(PathBuf::from(DEFAULT_CACHE_DIR)),
            open_browser: true,
            log_format: LogFormat::Pretty,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = PaymentDetails::default();
        let recipient = match get_optional_env("GWD_WHATSAPP_NUMBER") {
            Some(number) => Recipient::new(&number).map_err(|e| {
                ConfigError::InvalidEnvVar("GWD_WHATSAPP_NUMBER".to_string(), e.to_string())
            })?,
            None => Recipient::default(),
        };

        let payment = PaymentDetails {
            till_number: get_digits_env("GWD_MPESA_TILL", &defaults.till_number)?,
            bank_name: get_env_or_default("GWD_BANK_NAME", &defaults.bank_name),
            account_name: get_env_or_default("GWD_BANK_ACCOUNT_NAME", &defaults.account_name),
            account_number: get_digits_env("GWD_BANK_ACCOUNT_NUMBER", &defaults.account_number)?,
        };

        let open_browser = parse_bool(&get_env_or_default("GWD_OPEN_BROWSER", "true"))
            .map_err(|e| ConfigError::InvalidEnvVar("GWD_OPEN_BROWSER".to_string(), e))?;
        let log_format = parse_log_format(&get_env_or_default("GWD_LOG_FORMAT", "pretty"))
            .map_err(|e| ConfigError::InvalidEnvVar("GWD_LOG_FORMAT".to_string(), e))?;
        let sentry_sample_rate =
            parse_sample_rate(&get_env_or_default("SENTRY_SAMPLE_RATE", "1.0"))
                .map_err(|e| ConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE".to_string(), e))?;

        Ok(Self {
            recipient,
            payment,
            menu_path: get_optional_env("GWD_MENU_PATH").map(PathBuf::from),
            cache_dir: parse_cache_dir(&get_env_or_default("GWD_CACHE_DIR", DEFAULT_CACHE_DIR)),
            open_browser,
            log_format,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }

    /// The fixed checkout settings derived from this configuration.
    #[must_use]
    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            recipient: self.recipient.clone(),
            payment: self.payment.clone(),
        }
    }
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a digits-only environment variable with a default value.
fn get_digits_env(key: &str, default: &str) -> Result<String, ConfigError> {
    let value = get_env_or_default(key, default);
    validate_digits(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))?;
    Ok(value)
}

fn validate_digits(value: &str) -> Result<(), String> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("expected digits only, got {value:?}"));
    }
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got {other:?}")),
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pretty" | "text" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => Err(format!("expected pretty or json, got {other:?}")),
    }
}

fn parse_sample_rate(value: &str) -> Result<f32, String> {
    let rate = value
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("{e}: {value:?}"))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(format!("must be between 0.0 and 1.0, got {rate}"));
    }
    Ok(rate)
}

fn parse_cache_dir(value: &str) -> Option<PathBuf> {
    match value.trim() {
        "off" | "none" | "disabled" => None,
        dir => Some(PathBuf::from(dir)),
    }
}
