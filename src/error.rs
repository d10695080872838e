//! Error taxonomy for the scraping surface.
//!
//! Only the request boundary errors: a missing or unparseable URL, or a
//! failed upstream fetch. Per-field extraction misses and malformed
//! selector hints are never errors; they degrade to empty strings inside
//! the engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The caller-supplied URL is missing or does not parse.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Network-level fetch failure (DNS, connect, timeout, body read).
    #[error("scraping failed: {0}")]
    Fetch(String),

    /// The upstream server answered with a non-success status.
    #[error("scraping failed: {url} returned HTTP {status}")]
    UpstreamStatus { status: u16, url: String },
}

impl ScrapeError {
    /// HTTP status the REST boundary maps this error to.
    pub fn status_code(&self) -> u16 {
        match self {
            ScrapeError::InvalidUrl(_) => 400,
            ScrapeError::Fetch(_) | ScrapeError::UpstreamStatus { .. } => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(ScrapeError::InvalidUrl("x".into()).status_code(), 400);
        assert_eq!(ScrapeError::Fetch("x".into()).status_code(), 502);
        assert_eq!(
            ScrapeError::UpstreamStatus { status: 404, url: "u".into() }.status_code(),
            502
        );
    }

    #[test]
    fn test_display_is_descriptive() {
        let e = ScrapeError::UpstreamStatus {
            status: 404,
            url: "https://a.com".into(),
        };
        assert_eq!(e.to_string(), "scraping failed: https://a.com returned HTTP 404");
    }
}
