//! Page fetcher wrapping reqwest.
//!
//! Not a browser: one GET per request with a browser-like user agent, a
//! bounded timeout, and limited redirects. Failures are wrapped into a
//! single descriptive [`ScrapeError`] and surfaced once; there is no
//! retry and no partial result.

use std::time::Duration;

use crate::error::ScrapeError;

/// Upstream fetch timeout: the collaborator's contract, not the engine's.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/131.0.0.0 Safari/537.36";

/// HTTP client for page fetches.
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Fetch one page and return its body as text.
    ///
    /// Non-2xx statuses are errors: extraction is never attempted on an
    /// error page.
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::Fetch(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ScrapeError::Fetch(format!("reading body from {url} failed: {e}")))
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}
