//! Conversion from canonical messages to Anthropic messages
//!
//! Images are inlined as base64 when their public URL can be downloaded and
//! referenced by URL otherwise. System messages are left out; they travel in
//! the request's top-level `system` field.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures_util::{StreamExt, future, stream};
use parley_config::FetchConfig;
use parley_core::{AssetUrls, Message, Part, PartMeta, PartType, Role};
use serde_json::{Map, Value};

use super::{Converter, single_text};
use crate::error::{ConvertError, FetchError};
use crate::fetch::{HttpImageFetcher, ImageFetcher};
use crate::protocol::anthropic::{AnthropicContent, AnthropicContentBlock, AnthropicImageSource, AnthropicMessage};

const DEFAULT_MAX_CONCURRENT: usize = 4;
const DEFAULT_IMAGE_MEDIA_TYPE: &str = "image/jpeg";

/// Converts canonical messages to Anthropic Messages API messages
#[derive(Clone)]
pub struct AnthropicConverter {
    fetcher: Arc<dyn ImageFetcher>,
    max_concurrent: usize,
}

impl AnthropicConverter {
    /// Create a converter that downloads images through `fetcher`
    pub fn new(fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            fetcher,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Create a converter that downloads images over HTTP under `config`
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Request` if the HTTP client cannot be built.
    pub fn from_config(config: &FetchConfig) -> Result<Self, FetchError> {
        let fetcher = HttpImageFetcher::new(config.clone())?;
        Ok(Self::new(Arc::new(fetcher)).with_max_concurrent(config.max_concurrent))
    }

    /// Limit how many image downloads of one message run at once
    #[must_use]
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Convert messages, downloading images where possible
    pub async fn convert_messages(&self, messages: &[Message], asset_urls: &AssetUrls) -> Vec<AnthropicMessage> {
        let mut out = Vec::with_capacity(messages.len());

        for msg in messages {
            if msg.role == Role::System {
                continue;
            }

            let content = if msg.parts.is_empty() {
                None
            } else {
                Some(self.message_content(msg, asset_urls).await)
            };

            out.push(AnthropicMessage {
                role: anthropic_role(&msg.role).to_owned(),
                content,
            });
        }

        out
    }

    async fn message_content(&self, msg: &Message, asset_urls: &AssetUrls) -> AnthropicContent {
        if let Some(text) = single_text(msg) {
            return AnthropicContent::Text(text);
        }

        let pending: Vec<_> = msg.parts.iter().map(|part| self.part_to_block(part, asset_urls)).collect();
        let mut blocks: Vec<AnthropicContentBlock> = stream::iter(pending)
            .buffered(self.max_concurrent)
            .filter_map(future::ready)
            .collect()
            .await;

        if let [AnthropicContentBlock::Text { text }] = blocks.as_mut_slice() {
            return AnthropicContent::Text(std::mem::take(text));
        }

        AnthropicContent::Blocks(blocks)
    }

    async fn part_to_block(&self, part: &Part, asset_urls: &AssetUrls) -> Option<AnthropicContentBlock> {
        match part.part_type {
            PartType::Text => non_empty_text(&part.text),
            PartType::Image => self.image_block(part, asset_urls).await,
            PartType::ToolCall => part.meta.as_ref().map(tool_use_block),
            PartType::ToolResult => part.meta.as_ref().map(|meta| tool_result_block(meta, &part.text)),
            PartType::Audio | PartType::Video | PartType::File => media_reference_block(part, asset_urls),
            PartType::Data | PartType::Other(_) => non_empty_text(&part.text),
        }
    }

    async fn image_block(&self, part: &Part, asset_urls: &AssetUrls) -> Option<AnthropicContentBlock> {
        let asset = part.asset.as_ref()?;
        let url = asset.public_url(asset_urls)?;

        let media_type = if asset.mime.is_empty() {
            DEFAULT_IMAGE_MEDIA_TYPE.to_owned()
        } else {
            asset.mime.clone()
        };

        let source = match self.fetcher.fetch(url).await {
            Ok(bytes) if !bytes.is_empty() => AnthropicImageSource::Base64 {
                media_type,
                data: STANDARD.encode(bytes),
            },
            Ok(_) => {
                tracing::debug!(url, "image body was empty, referencing by url");
                AnthropicImageSource::Url {
                    media_type,
                    url: url.to_owned(),
                }
            }
            Err(err) => {
                tracing::debug!(url, error = %err, "image download failed, referencing by url");
                AnthropicImageSource::Url {
                    media_type,
                    url: url.to_owned(),
                }
            }
        };

        Some(AnthropicContentBlock::Image { source })
    }
}

#[async_trait]
impl Converter for AnthropicConverter {
    type Output = Vec<AnthropicMessage>;

    async fn convert(&self, messages: &[Message], asset_urls: &AssetUrls) -> Result<Self::Output, ConvertError> {
        Ok(self.convert_messages(messages, asset_urls).await)
    }
}

/// Map a canonical role to an Anthropic role
///
/// Only `assistant` survives; every other role speaks as `user`.
pub const fn anthropic_role(role: &Role) -> &'static str {
    match role {
        Role::Assistant => "assistant",
        _ => "user",
    }
}

fn non_empty_text(text: &str) -> Option<AnthropicContentBlock> {
    (!text.is_empty()).then(|| AnthropicContentBlock::Text { text: text.to_owned() })
}

fn tool_use_block(meta: &PartMeta) -> AnthropicContentBlock {
    AnthropicContentBlock::ToolUse {
        id: meta.id.clone(),
        name: meta.tool_name.clone(),
        input: meta.arguments.as_ref().and_then(arguments_object),
    }
}

/// Raw tool arguments as an object, `None` for any other JSON shape
///
/// Strings are not decoded, even when they hold an encoded object.
fn arguments_object(arguments: &Value) -> Option<Map<String, Value>> {
    match arguments {
        Value::Object(map) => Some(map.clone()),
        _ => None,
    }
}

fn tool_result_block(meta: &PartMeta, text: &str) -> AnthropicContentBlock {
    let tool_use_id = meta.tool_call_id.clone().or_else(|| meta.id.clone());

    let content = match &meta.result {
        Some(Value::String(result)) => Some(result.clone()),
        Some(result) => serde_json::to_string(result).ok(),
        None if !text.is_empty() => Some(text.to_owned()),
        None => serde_json::to_string(meta).ok(),
    };

    AnthropicContentBlock::ToolResult {
        tool_use_id,
        content,
        is_error: meta.is_error.unwrap_or(false),
    }
}

/// Text block pointing at a media asset Anthropic cannot take inline
fn media_reference_block(part: &Part, asset_urls: &AssetUrls) -> Option<AnthropicContentBlock> {
    let url = part.asset.as_ref().and_then(|asset| asset.public_url(asset_urls));

    match url {
        Some(url) => Some(AnthropicContentBlock::Text {
            text: format!("{}\n[{}: {url}]", part.text, part.part_type),
        }),
        None => non_empty_text(&part.text),
    }
}
