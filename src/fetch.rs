//! HTTP page fetcher wrapping reqwest.
//!
//! One GET per source page, bounded timeout, no retries: the pipeline
//! runs exactly once at startup and a page that cannot be fetched is a
//! startup failure, not something to paper over with backoff.

use std::time::Duration;

use crate::error::{BotError, BotResult};

/// Fetch timeout for source pages.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for retrieving the source pages.
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Create a fetcher with a standard Chrome user-agent.
    pub fn new() -> Self {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                  AppleWebKit/537.36 (KHTML, like Gecko) \
                  Chrome/131.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(ua)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// GET a page and return its body as text.
    ///
    /// Any transport failure or non-2xx status is an explicit error
    /// carrying the URL, so startup logs point at the exact page.
    pub async fn get(&self, url: &str) -> BotResult<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| BotError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BotError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(|source| BotError::Fetch {
            url: url.to_string(),
            source,
        })
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}
