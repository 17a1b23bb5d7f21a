use std::path::PathBuf;

use thiserror::Error;

use crate::core::client::RetryConfig;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum IsError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// Reading or writing a stored document failed.
    #[error("I/O error at {path}: {source}", path = .path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A stored document could not be encoded or decoded.
    #[error("JSON error in {path}: {source}", path = .path.display())]
    Json {
        /// The file involved.
        path: PathBuf,
        /// The underlying serde failure.
        #[source]
        source: serde_json::Error,
    },

    /// The fetched page was in an unexpected format or was missing a required element.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// A freshly scraped snapshot violated its invariants.
    #[error("malformed snapshot for {entity}: {reason}")]
    Malformed {
        /// The entity (company slug) being processed.
        entity: String,
        /// What was wrong with the snapshot.
        reason: String,
    },

    /// Rendering or delivering a notification failed.
    #[error("notification failed: {0}")]
    Notify(String),

    /// Configuration was missing or could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl IsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IsError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        IsError::Json {
            path: path.into(),
            source,
        }
    }

    /// Whether a failed scrape should be attempted again under `cfg`.
    ///
    /// Storage, validation and configuration faults are never retryable; a page
    /// that loaded without the expected markup is.
    pub fn is_retryable(&self, cfg: &RetryConfig) -> bool {
        match self {
            IsError::Http(e) => {
                if e.is_timeout() {
                    cfg.retry_on_timeout
                } else if e.is_connect() {
                    cfg.retry_on_connect
                } else if let Some(status) = e.status() {
                    cfg.retry_on_status.contains(&status.as_u16())
                } else {
                    true
                }
            }
            IsError::Status { status, .. } => cfg.retry_on_status.contains(status),
            IsError::Data(_) => true,
            IsError::Url(_)
            | IsError::Io { .. }
            | IsError::Json { .. }
            | IsError::Malformed { .. }
            | IsError::Notify(_)
            | IsError::Config(_) => false,
        }
    }
}
