//! Public client surface + builder.
//! Internals are split into `retry` (policy + combinator) and `constants` (UA + defaults).

mod constants;
mod retry;

pub use retry::{Backoff, RetryConfig, with_retry};

use crate::core::{IsError, net};
use constants::{DEFAULT_BASE_COMPANY, DEFAULT_TIMEOUT_MS, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// HTTP client used to fetch company pages.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct IsClient {
    http: Client,
    base_company: Url,
    retry: RetryConfig,
}

impl Default for IsClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl IsClient {
    /// Create a new builder.
    pub fn builder() -> IsClientBuilder {
        IsClientBuilder::default()
    }

    /* -------- getters used by the tracker and scraper -------- */

    /// The base URL company slugs are resolved against.
    pub fn base_company(&self) -> &Url {
        &self.base_company
    }

    /// The retry policy the tracker composes around each scrape.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Resolve the page URL for a company slug.
    pub fn company_url(&self, slug: &str) -> Result<Url, IsError> {
        Ok(self.base_company.join(slug)?)
    }

    /// Fetch a page body, rejecting unsuccessful statuses. No retry happens here.
    pub(crate) async fn get_page(&self, url: &Url, slug: &str) -> Result<String, IsError> {
        let resp = self.http.get(url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(IsError::Status {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(net::get_text(resp, slug).await?)
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct IsClientBuilder {
    user_agent: Option<String>,
    base_company: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
}

impl IsClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the company page base (e.g., `https://www.insiderscreener.com/en/company/`).
    ///
    /// The URL should end with `/` so that slugs are appended rather than
    /// replacing the last segment.
    #[must_use]
    pub fn base_company(mut self, url: Url) -> Self {
        self.base_company = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: 30s.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Set the retry policy used around scrapes.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    pub fn build(self) -> Result<IsClient, IsError> {
        let base_company = match self.base_company {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_COMPANY)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .cookie_store(true)
            .timeout(
                self.timeout
                    .unwrap_or(Duration::from_millis(DEFAULT_TIMEOUT_MS)),
            );

        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(IsClient {
            http,
            base_company,
            retry: self.retry.unwrap_or_default(),
        })
    }
}
