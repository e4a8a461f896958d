//! Read-through HTML proxy client.
//!
//! Marketplace pages disallow cross-origin reads, so rendered markup is
//! fetched through a public read-through proxy that wraps the raw page in a
//! JSON envelope (`{"contents": "<html>..."}`). The proxy is untrusted:
//! callers treat every failure here as a degradation, never a hard error.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::FetchError;

/// Default read-through proxy endpoint.
pub const DEFAULT_PROXY_BASE: &str = "https://api.allorigins.win/get";

/// Default per-request deadline. The proxy occasionally hangs on slow
/// origins; an unbounded fetch would stall a field's resolution forever.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Fetches rendered page markup for a target URL.
///
/// The trait seam exists so extractors can be exercised against canned
/// markup in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the raw HTML of `url`.
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

/// Configuration for [`AllOriginsFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Proxy endpoint; the target URL is appended as `?url=<encoded>`.
    pub proxy_base: String,

    /// Per-request deadline.
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            proxy_base: DEFAULT_PROXY_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FetchConfig {
    /// Override the proxy endpoint.
    pub fn with_proxy_base(mut self, base: impl Into<String>) -> Self {
        self.proxy_base = base.into();
        self
    }

    /// Override the per-request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Production fetcher backed by the AllOrigins-style proxy.
pub struct AllOriginsFetcher {
    client: reqwest::Client,
    proxy_base: String,
}

impl AllOriginsFetcher {
    /// Build a fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        // Browser-like User-Agent; some origins refuse default client UAs
        // even through the proxy.
        let user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
            AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            proxy_base: config.proxy_base,
        })
    }
}

#[async_trait]
impl PageFetcher for AllOriginsFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let proxied = format!("{}?url={}", self.proxy_base, urlencoding::encode(url));
        tracing::debug!(url = %url, "fetching page through proxy");

        let response = self.client.get(&proxied).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        contents_from_envelope(&body)
    }
}

#[derive(Deserialize)]
struct ProxyEnvelope {
    contents: Option<String>,
}

/// Unwrap the proxy's JSON envelope into raw page markup.
fn contents_from_envelope(body: &str) -> Result<String, FetchError> {
    let envelope: ProxyEnvelope = serde_json::from_str(body)?;
    envelope
        .contents
        .filter(|c| !c.trim().is_empty())
        .ok_or(FetchError::MissingContents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_envelope_contents() {
        let body = r#"{"contents": "<html><body>ok</body></html>"}"#;
        assert_eq!(
            contents_from_envelope(body).unwrap(),
            "<html><body>ok</body></html>"
        );
    }

    #[test]
    fn missing_contents_is_an_error() {
        assert!(matches!(
            contents_from_envelope(r#"{"status": {"http_code": 200}}"#),
            Err(FetchError::MissingContents)
        ));
        assert!(matches!(
            contents_from_envelope(r#"{"contents": "   "}"#),
            Err(FetchError::MissingContents)
        ));
    }

    #[test]
    fn garbage_body_is_a_bad_envelope() {
        assert!(matches!(
            contents_from_envelope("<html>not json</html>"),
            Err(FetchError::BadEnvelope(_))
        ));
    }

    #[test]
    fn config_builder_overrides() {
        let config = FetchConfig::default()
            .with_proxy_base("https://proxy.test/get")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.proxy_base, "https://proxy.test/get");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
