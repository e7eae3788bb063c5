//! Page fetching.
//!
//! Everything above this module talks to the network through the
//! [`PageSource`] trait, so the collectors and parsers can be driven by
//! [`HttpFetcher`] in production and by in-memory pages in tests.
//!
//! Requests carry a fixed browser-like `User-Agent`; archive sites tend to
//! reject clients that do not identify themselves. There is no timeout and no
//! retry, and redirects follow reqwest's default policy.

use crate::error::FetchError;
use std::time::Instant;
use tracing::{debug, instrument};

/// User agent sent with every request unless overridden on the command line.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Something that can turn a URL into the raw bytes of a page.
pub trait PageSource {
    /// Fetch `url` and return the response body.
    ///
    /// A 4xx/5xx response is an error, not a body.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// [`PageSource`] backed by a single shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher that identifies itself as `user_agent`.
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let t0 = Instant::now();
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        debug!(
            %status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body.to_vec())
    }
}
