//! Explicit runtime configuration.
//!
//! Everything the stores, client and tracker need is carried in [`Settings`] and
//! handed over at construction; nothing reads process-wide state after startup.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::core::IsError;
use crate::core::client::{Backoff, RetryConfig};

/// Where snapshots, history artifacts and change ledgers live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Base data directory containing `current/`, `history/` and `changes/`.
    pub base_dir: PathBuf,
    /// How many ledger entries are kept per company; older ones are dropped.
    pub max_change_history: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("data"),
            max_change_history: 100,
        }
    }
}

/// SMTP settings for alert emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub user: Option<String>,
    pub password: Option<String>,
    pub recipient: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            user: None,
            password: None,
            recipient: None,
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
        }
    }
}

impl EmailSettings {
    /// True when sender, password and recipient are all present.
    pub fn is_complete(&self) -> bool {
        [&self.user, &self.password, &self.recipient]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

/// Full configuration for a tracking run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub storage: StorageConfig,
    pub retry: RetryConfig,
    pub request_timeout: Duration,
    /// Companies processed at once. `1` keeps the fixed sequential order.
    pub max_concurrent: usize,
    pub email: EmailSettings,
    pub send_notifications: bool,
    pub send_summary: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            retry: RetryConfig::default(),
            request_timeout: Duration::from_secs(30),
            max_concurrent: 1,
            email: EmailSettings::default(),
            send_notifications: true,
            send_summary: false,
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// Reads:
    /// - `DATA_DIR`, `MAX_CHANGE_HISTORY`
    /// - `RETRY_ATTEMPTS`, `RETRY_DELAY_BASE` (seconds), `REQUEST_TIMEOUT_MS`
    /// - `MAX_CONCURRENT`
    /// - `EMAIL_USER`, `EMAIL_PASS`, `RECIPIENT_EMAIL`, `SMTP_HOST`, `SMTP_PORT`
    /// - `SEND_NOTIFICATIONS` (default true), `SEND_SUMMARY` (default false)
    pub fn from_env() -> Result<Self, IsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage = StorageConfig {
            base_dir: get("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage.base_dir),
            max_change_history: parse_or(&get, "MAX_CHANGE_HISTORY", 100usize)?,
        };
        if storage.max_change_history == 0 {
            return Err(IsError::Config("MAX_CHANGE_HISTORY must be at least 1".into()));
        }

        let base: f64 = parse_or(&get, "RETRY_DELAY_BASE", 2.0)?;
        let retry = RetryConfig {
            max_attempts: parse_or(&get, "RETRY_ATTEMPTS", 3u32)?,
            backoff: Backoff::Power {
                base,
                max: Duration::from_secs(60),
            },
            ..RetryConfig::default()
        };

        let email = EmailSettings {
            user: get("EMAIL_USER"),
            password: get("EMAIL_PASS"),
            recipient: get("RECIPIENT_EMAIL"),
            smtp_host: get("SMTP_HOST").unwrap_or(defaults.email.smtp_host),
            smtp_port: parse_or(&get, "SMTP_PORT", defaults.email.smtp_port)?,
        };

        Ok(Settings {
            storage,
            retry,
            request_timeout: Duration::from_millis(parse_or(
                &get,
                "REQUEST_TIMEOUT_MS",
                30_000u64,
            )?),
            max_concurrent: parse_or(&get, "MAX_CONCURRENT", 1usize)?.max(1),
            email,
            send_notifications: flag_or(&get, "SEND_NOTIFICATIONS", true),
            send_summary: flag_or(&get, "SEND_SUMMARY", false),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, IsError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| IsError::Config(format!("{key}={raw:?}: {e}"))),
        None => Ok(default),
    }
}

fn flag_or<G>(get: &G, key: &str, default: bool) -> bool
where
    G: Fn(&str) -> Option<String>,
{
    get(key).map_or(default, |v| v.trim().eq_ignore_ascii_case("true"))
}
