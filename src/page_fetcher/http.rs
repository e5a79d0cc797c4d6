//! HTTP page source with timeout, pacing and retry.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::{FetchError, PageSource, decode_page};
use crate::config::ManualConfig;
use crate::crawl_engine::rate_limiter::RequestPacer;
use crate::crawl_engine::{CrawlError, CrawlResult};
use crate::link_index::NodeId;
use crate::utils::{NODE_ID_PLACEHOLDER, USER_AGENT};

/// Upper bound for a single backoff delay
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Fetches manual pages from the configured host.
///
/// Requests are sequential: each one waits for the pacer, carries the
/// configured timeout, and transient failures are retried with exponential
/// backoff.
pub struct HttpPageSource {
    client: Client,
    url_template: String,
    encoding: String,
    pacer: Option<RequestPacer>,
    max_retries: u8,
    retry_base_delay: Duration,
}

impl HttpPageSource {
    pub fn from_config(config: &ManualConfig) -> CrawlResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CrawlError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url_template: config.page_url_template().to_string(),
            encoding: config.source_encoding().to_string(),
            pacer: config.crawl_rate_rps().map(RequestPacer::new),
            max_retries: config.max_retries(),
            retry_base_delay: config.retry_base_delay(),
        })
    }

    #[must_use]
    pub fn page_url(&self, id: &NodeId) -> String {
        self.url_template.replace(NODE_ID_PLACEHOLDER, id.as_str())
    }

    /// Backoff before retry number `attempt + 1`
    fn retry_delay(&self, attempt: u8) -> Duration {
        let factor = 1u32.checked_shl(u32::from(attempt)).unwrap_or(u32::MAX);
        self.retry_base_delay
            .saturating_mul(factor)
            .min(MAX_RETRY_DELAY)
    }

    async fn fetch_once(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header("Accept", "text/html,*/*;q=0.8")
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(decode_page(&body, &self.encoding))
    }
}

impl PageSource for HttpPageSource {
    async fn fetch(&self, id: &NodeId) -> Result<String, FetchError> {
        let raw_url = self.page_url(id);
        let url = Url::parse(&raw_url).map_err(|source| FetchError::InvalidUrl {
            url: raw_url,
            source,
        })?;
        let mut attempt: u8 = 0;

        loop {
            if let Some(pacer) = &self.pacer {
                pacer.acquire().await;
            }

            match self.fetch_once(&url).await {
                Ok(body) => {
                    log::debug!("Fetched {url} ({} bytes)", body.len());
                    return Ok(body);
                }
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = self.retry_delay(attempt);
                    attempt += 1;
                    log::warn!(
                        "Fetching node {id} failed ({e}), retry {attempt}/{} in {delay:?}",
                        self.max_retries
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
