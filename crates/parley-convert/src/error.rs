use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by a conversion
///
/// Per-part problems (unresolved assets, odd metadata, failed downloads) are
/// absorbed inside the converters and never produce one of these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The converted payload could not be encoded as JSON
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reasons an image could not be downloaded for inlining
#[derive(Debug, Error)]
pub enum FetchError {
    /// Downloads are turned off in configuration
    #[error("image fetching is disabled")]
    Disabled,

    /// The URL does not parse
    #[error("invalid image url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Only `http` and `https` are fetched
    #[error("unsupported url scheme `{0}`")]
    UnsupportedScheme(String),

    /// The host is not on the allow-list
    #[error("host `{0}` is not allowed")]
    HostNotAllowed(String),

    /// Connection, timeout, redirect or body read failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Anything other than `200 OK`
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// The body is larger than the configured cap
    #[error("image exceeds {limit} bytes")]
    TooLarge {
        /// Configured cap in bytes
        limit: u64,
    },
}
