//! Centralized constants for default endpoints and UA.

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// Company page base (the company slug is appended).
pub(crate) const DEFAULT_BASE_COMPANY: &str = "https://www.insiderscreener.com/en/company/";

/// Overall request timeout used when none is configured.
pub(crate) const DEFAULT_TIMEOUT_MS: u64 = 30_000;
