use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// Lookup from asset content hash to its resolved public URL
///
/// Supplied fresh for every conversion; converters never cache it.
pub type AssetUrls = HashMap<String, PublicUrl>;

/// Reference to binary content stored outside the message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Hex-encoded SHA-256 of the content
    pub sha256: String,
    /// MIME type, empty when unknown
    #[serde(default, deserialize_with = "null_as_default")]
    pub mime: String,
    /// Storage bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    /// Object key within the bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_key: Option<String>,
    /// Storage entity tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// Content size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_b: Option<u64>,
}

impl Asset {
    /// Create an asset reference from its hash and MIME type
    pub fn new(sha256: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            sha256: sha256.into(),
            mime: mime.into(),
            bucket: None,
            s3_key: None,
            etag: None,
            size_b: None,
        }
    }

    /// Resolve this asset to its public URL
    ///
    /// Returns `None` when the hash has no entry or the entry's URL is empty.
    pub fn public_url<'a>(&self, urls: &'a AssetUrls) -> Option<&'a str> {
        urls.get(&self.sha256)
            .map(|public| public.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

/// A resolved, externally reachable URL for an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUrl {
    /// The URL, empty when not yet signed
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// When a signed URL stops being valid (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<String>,
}

impl PublicUrl {
    /// A URL without expiry
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            expire_at: None,
        }
    }
}
