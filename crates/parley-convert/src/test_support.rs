use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parley_core::{Asset, AssetUrls, Message, Part, PublicUrl};
use reqwest::StatusCode;

use crate::error::FetchError;
use crate::fetch::ImageFetcher;

/// In-memory fetcher serving fixed bodies; unknown URLs answer 404
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    images: HashMap<String, Vec<u8>>,
    calls: Arc<AtomicUsize>,
}

impl StaticFetcher {
    pub fn with_image(mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.images.insert(url.into(), bytes.into());
        self
    }

    /// Number of fetches made through this fetcher and its clones
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.images
            .get(url)
            .cloned()
            .ok_or(FetchError::Status(StatusCode::NOT_FOUND))
    }
}

/// Greeting exchange followed by a text-and-image question
pub fn analysis_messages() -> Vec<Message> {
    vec![
        Message::text("user", "Hello"),
        Message::text("assistant", "Hi there!"),
        Message::new(
            "user",
            vec![
                Part::text("Can you analyze this image?"),
                Part::image(Asset::new("abc123", "image/png")).with_filename("test.png"),
            ],
        ),
    ]
}

/// Lookup resolving the image of [`analysis_messages`]
pub fn analysis_urls() -> AssetUrls {
    AssetUrls::from([("abc123".to_owned(), PublicUrl::new("https://example.com/test.png"))])
}
