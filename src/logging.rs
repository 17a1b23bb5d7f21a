//! Logging configuration and initialization.
//!
//! The console gets the `RUST_LOG`/`LOG_LEVEL` filter. The optional log file
//! has its own filter (debug by default) and is rotated by size.

use std::env;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Rotate the log file once it would grow past this many bytes.
pub const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024;
/// Rotated files kept next to the live one (`scraper.log.1` is the newest).
pub const DEFAULT_BACKUP_COUNT: usize = 5;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default level filter, used when `RUST_LOG` is not set
    pub default_level: String,
    /// Write a plain-text copy of the log to this file
    pub file: Option<PathBuf>,
    /// Filter for the file copy, independent of the console
    pub file_level: String,
    /// Size limit of the live log file
    pub max_bytes: usize,
    /// Number of rotated files kept
    pub backup_count: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: "info".to_string(),
            file: Some(PathBuf::from("scraper.log")),
            file_level: "debug".to_string(),
            max_bytes: DEFAULT_MAX_BYTES,
            backup_count: DEFAULT_BACKUP_COUNT,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `LOG_LEVEL`: default log level (fallback if `RUST_LOG` not set)
    /// - `LOG_FILE`: log file path; empty disables the file copy
    /// - `LOG_FILE_LEVEL`: filter for the file copy (default `debug`)
    /// - `LOG_MAX_BYTES`: rotation size (default 10 MiB)
    /// - `LOG_BACKUP_COUNT`: rotated files kept (default 5)
    ///
    /// Logging starts before anything can report a bad value, so zero or
    /// unparsable sizes and counts keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let level = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());
        let positive = |key: &str| {
            lookup(key)
                .and_then(|s| s.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
        };
        Self {
            default_level: level("LOG_LEVEL").unwrap_or(defaults.default_level),
            file: match lookup("LOG_FILE") {
                Some(path) if path.trim().is_empty() => None,
                Some(path) => Some(PathBuf::from(path)),
                None => defaults.file,
            },
            file_level: level("LOG_FILE_LEVEL").unwrap_or(defaults.file_level),
            max_bytes: positive("LOG_MAX_BYTES").unwrap_or(defaults.max_bytes),
            backup_count: positive("LOG_BACKUP_COUNT").unwrap_or(defaults.backup_count),
        }
    }

    /// Disable the log file
    #[must_use]
    pub fn without_file(mut self) -> Self {
        self.file = None;
        self
    }
}

/// A size-rotated writer for `path`.
///
/// # Errors
///
/// Returns an error if `path` cannot be opened for appending.
pub fn rotating_writer(
    path: &Path,
    max_bytes: usize,
    backup_count: usize,
) -> io::Result<FileRotate<AppendCount>> {
    // FileRotate swallows open failures, so surface them here.
    OpenOptions::new().create(true).append(true).open(path)?;
    Ok(FileRotate::new(
        path,
        AppendCount::new(backup_count.max(1)),
        ContentLimit::Bytes(max_bytes.max(1)),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}

/// Initialize logging with the given configuration
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is already set
pub fn init(config: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.default_level));

    let file_layer = match &config.file {
        Some(path) => {
            let writer = rotating_writer(path, config.max_bytes, config.backup_count)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(writer))
                    .with_filter(EnvFilter::new(&config.file_level)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_filter(console_filter))
        .with(file_layer)
        .try_init()?;

    Ok(())
}
