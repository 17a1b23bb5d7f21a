//! Core components of the `insider-screener` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The HTTP [`IsClient`], its builder and the retry policy.
//! - The primary [`IsError`] type.
//! - Shared data models like [`Snapshot`] and [`TransactionRecord`].
//! - Explicit runtime configuration ([`Settings`]).

/// The HTTP client (`IsClient`), builder, and retry policy.
pub mod client;
/// Runtime configuration passed into stores, client and tracker.
pub mod config;
/// The primary error type (`IsError`) for the crate.
pub mod error;
/// Shared data models used across modules (e.g., `Snapshot`, `TransactionRecord`).
pub mod models;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::IsClient`
pub use client::{Backoff, IsClient, IsClientBuilder, RetryConfig, with_retry};
pub use config::{EmailSettings, Settings, StorageConfig};
pub use error::IsError;
pub use models::{CompanyInfo, Snapshot, TransactionRecord};
