//! Bounded image downloads for inlining into Anthropic payloads

use async_trait::async_trait;
use parley_config::FetchConfig;
use reqwest::{Client, StatusCode, redirect};
use url::Url;

use crate::error::FetchError;

/// Most redirects followed before giving up
const MAX_REDIRECTS: usize = 5;

/// Source of image bytes for inlining
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Download the image at `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// [`ImageFetcher`] backed by `reqwest`
///
/// Every download is bounded: only `http`/`https`, an optional host
/// allow-list (re-checked on each redirect hop), a request timeout and a cap
/// on the body size.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpImageFetcher {
    /// Create a fetcher from configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Request` if the HTTP client cannot be built.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let redirect_config = config.clone();
        let policy = redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else if permitted(&redirect_config, attempt.url()).is_ok() {
                attempt.follow()
            } else {
                attempt.stop()
            }
        });

        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(policy)
            .build()?;

        Ok(Self { client, config })
    }

    /// The limits this fetcher enforces
    pub const fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if !self.config.enabled {
            return Err(FetchError::Disabled);
        }

        let url = Url::parse(url)?;
        permitted(&self.config, &url)?;

        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        let limit = self.config.max_bytes;
        if response.content_length().is_some_and(|len| len > limit) {
            return Err(FetchError::TooLarge { limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let received = u64::try_from(body.len() + chunk.len()).unwrap_or(u64::MAX);
            if received > limit {
                return Err(FetchError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}

/// Check scheme and host of a URL against the fetch policy
fn permitted(config: &FetchConfig, url: &Url) -> Result<(), FetchError> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::UnsupportedScheme(url.scheme().to_owned()));
    }

    let host = url.host_str().unwrap_or_default();
    if !config.host_allowed(host) {
        return Err(FetchError::HostNotAllowed(host.to_owned()));
    }

    Ok(())
}
