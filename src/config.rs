//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before anything
//! else runs. A `.env` file in the working directory is honoured (loaded by
//! `dotenvy` in `main.rs`).
//!
//! ## Required Variables
//!
//! - `TELEGRAM_TOKEN` - Bot API token
//!
//! ## Optional Variables
//!
//! - `APP_ENV` - Environment label (default: `local`)
//! - `HTTP_SERVER_ADDRESS` - Bind address (default: `localhost:8080`)
//! - `BASE_URL` - Prefix for short links (default: `http://localhost:8080`)
//! - `HTTP_SERVER_TIMEOUT` - Request timeout (default: `5s`)
//! - `TELEGRAM_API_URL` - Bot API endpoint (default: `https://api.telegram.org`)
//! - `TELEGRAM_POLL_TIMEOUT` - Long-poll timeout (default: `60s`)
//! - `ALIAS_LENGTH` - Symbols per alias (default: 4)
//! - `ALIAS_MAX_RETRIES` - Generation attempts per allocation (default: 5)
//! - `ALLOCATION_STRATEGY` - `atomic` or `check-then-save` (default: `atomic`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! Timeouts take a duration such as `5s`, `1m30s` or `500ms`; a bare number
//! means seconds. Values that do not parse are rejected, never defaulted.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::application::services::shortener_service::{
    AllocationStrategy, DEFAULT_ALIAS_LENGTH, DEFAULT_MAX_RETRIES, ShortenerConfig,
};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub env: String,
    pub listen_addr: String,
    /// Prefix for composed short links, without a trailing slash.
    pub base_url: String,
    pub request_timeout: Duration,
    pub telegram_token: String,
    pub telegram_api_url: String,
    pub telegram_poll_timeout: Duration,
    pub alias_length: usize,
    pub alias_max_retries: usize,
    pub allocation_strategy: AllocationStrategy,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TELEGRAM_TOKEN` is missing, a numeric or
    /// duration variable does not parse, or `ALLOCATION_STRATEGY` is not
    /// recognised.
    pub fn from_env() -> Result<Self> {
        let env = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let listen_addr =
            env::var("HTTP_SERVER_ADDRESS").unwrap_or_else(|_| "localhost:8080".to_string());
        let base_url = env::var("BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        let request_timeout = duration_var("HTTP_SERVER_TIMEOUT", Duration::from_secs(5))?;

        let telegram_token = env::var("TELEGRAM_TOKEN").context("TELEGRAM_TOKEN must be set")?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .unwrap_or_else(|_| "https://api.telegram.org".to_string())
            .trim_end_matches('/')
            .to_string();

        let telegram_poll_timeout =
            duration_var("TELEGRAM_POLL_TIMEOUT", Duration::from_secs(60))?;

        let alias_length = parsed_var("ALIAS_LENGTH", DEFAULT_ALIAS_LENGTH)?;
        let alias_max_retries = parsed_var("ALIAS_MAX_RETRIES", DEFAULT_MAX_RETRIES)?;

        let allocation_strategy = match env::var("ALLOCATION_STRATEGY") {
            Ok(v) => v.parse().context("Invalid ALLOCATION_STRATEGY")?,
            Err(_) => AllocationStrategy::default(),
        };

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            env,
            listen_addr,
            base_url,
            request_timeout,
            telegram_token,
            telegram_api_url,
            telegram_poll_timeout,
            alias_length,
            alias_max_retries,
            allocation_strategy,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `alias_length` is outside 1..=32
    /// - `alias_max_retries` is outside 1..=100
    /// - `base_url` is not an absolute http(s) URL
    /// - `listen_addr` is not `host:port`
    /// - `log_format` is not `text` or `json`
    /// - the token is empty or a timeout is zero
    pub fn validate(&self) -> Result<()> {
        if !(1..=32).contains(&self.alias_length) {
            anyhow::bail!(
                "ALIAS_LENGTH must be between 1 and 32, got {}",
                self.alias_length
            );
        }

        if !(1..=100).contains(&self.alias_max_retries) {
            anyhow::bail!(
                "ALIAS_MAX_RETRIES must be between 1 and 100, got {}",
                self.alias_max_retries
            );
        }

        let base_url = url::Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL must be an absolute URL, got '{}'", self.base_url))?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            anyhow::bail!(
                "BASE_URL must use http or https, got '{}'",
                self.base_url
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "HTTP_SERVER_ADDRESS must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.telegram_token.trim().is_empty() {
            anyhow::bail!("TELEGRAM_TOKEN must not be empty");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("HTTP_SERVER_TIMEOUT must be greater than 0");
        }

        if self.telegram_poll_timeout < Duration::from_secs(1) {
            anyhow::bail!("TELEGRAM_POLL_TIMEOUT must be at least 1s");
        }

        Ok(())
    }

    /// Allocation parameters for the shortener service.
    pub fn shortener_config(&self) -> ShortenerConfig {
        ShortenerConfig {
            alias_length: self.alias_length,
            max_retries: self.alias_max_retries,
            strategy: self.allocation_strategy,
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {}", self.env);
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Request timeout: {:?}", self.request_timeout);
        tracing::info!("  Telegram API: {}", self.telegram_api_url);
        tracing::info!("  Telegram token: {}", mask_token(&self.telegram_token));
        tracing::info!("  Alias length: {}", self.alias_length);
        tracing::info!("  Alias retries: {}", self.alias_max_retries);
        tracing::info!("  Allocation strategy: {}", self.allocation_strategy);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads `name` with [`FromStr`], or `default` when unset.
fn parsed_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {name}: '{value}'")),
        Err(_) => Ok(default),
    }
}

/// Reads `name` with [`parse_duration`], or `default` when unset.
fn duration_var(name: &str, default: Duration) -> Result<Duration> {
    match env::var(name) {
        Ok(value) => parse_duration(&value).with_context(|| format!("Invalid {name}: '{value}'")),
        Err(_) => Ok(default),
    }
}

/// Parses a duration like `5s`, `1m30s`, `1.5h` or `250ms`.
///
/// Units: `ms`, `s`, `m`, `h`. A bare number is taken as seconds.
pub fn parse_duration(value: &str) -> Result<Duration> {
    let value = value.trim();
    if value.is_empty() {
        anyhow::bail!("empty duration");
    }

    if let Ok(secs) = value.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = value;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        let amount: f64 = number
            .parse()
            .with_context(|| format!("missing number in duration '{value}'"))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let unit_secs = match unit {
            "ms" => 0.001,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            "" => anyhow::bail!("missing unit in duration '{value}'"),
            other => anyhow::bail!("unknown unit '{other}' in duration '{value}'"),
        };

        total += Duration::try_from_secs_f64(amount * unit_secs)
            .with_context(|| format!("duration '{value}' out of range"))?;
        rest = tail;
    }

    Ok(total)
}

/// Masks a bot token for logging.
///
/// Telegram tokens look like `<bot id>:<secret>`; the bot id is kept, the
/// secret is replaced with `***`.
fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((bot_id, _)) => format!("{}:***", bot_id),
        None => "***".to_string(),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
