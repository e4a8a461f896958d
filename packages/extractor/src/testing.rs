//! Test support: canned [`PageFetcher`] implementations.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::proxy::PageFetcher;

/// Fetcher that returns the same markup for every URL.
pub struct CannedFetcher {
    html: String,
}

impl CannedFetcher {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

#[async_trait]
impl PageFetcher for CannedFetcher {
    async fn fetch_html(&self, _url: &str) -> Result<String, FetchError> {
        Ok(self.html.clone())
    }
}

/// Fetcher that always fails, for exercising degradation paths.
pub struct FailingFetcher;

#[async_trait]
impl PageFetcher for FailingFetcher {
    async fn fetch_html(&self, _url: &str) -> Result<String, FetchError> {
        Err(FetchError::MissingContents)
    }
}
