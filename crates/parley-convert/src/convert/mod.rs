//! Conversion from the canonical message model to provider payloads
//!
//! Each submodule implements [`Converter`] for one target format.
//! [`MessageConverter`] selects among them by [`MessageFormat`].

pub mod anthropic;
pub mod langchain;
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;
use parley_config::FetchConfig;
use parley_core::{AssetUrls, Message, MessageFormat};
use serde::Serialize;

pub use self::anthropic::AnthropicConverter;
pub use self::langchain::LangChainConverter;
pub use self::openai::OpenAiConverter;
use crate::error::{ConvertError, FetchError};
use crate::fetch::ImageFetcher;
use crate::protocol::anthropic::AnthropicMessage;
use crate::protocol::langchain::LangChainMessage;
use crate::protocol::openai::OpenAiMessage;

/// Translates canonical messages into one provider's payload
///
/// Implementations are stateless with respect to calls and safe to share.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Provider payload produced by this converter
    type Output: Serialize + Send;

    /// Convert `messages`, resolving asset hashes through `asset_urls`
    ///
    /// Conversion is total: unresolvable assets, malformed metadata and
    /// failed downloads degrade the affected part instead of failing.
    async fn convert(&self, messages: &[Message], asset_urls: &AssetUrls) -> Result<Self::Output, ConvertError>;
}

/// Payload produced by [`MessageConverter`]
///
/// Serializes as the bare message array of the selected format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConvertedMessages {
    /// `OpenAI` chat messages
    OpenAi(Vec<OpenAiMessage>),
    /// Anthropic messages
    Anthropic(Vec<AnthropicMessage>),
    /// LangChain chat messages
    LangChain(Vec<LangChainMessage>),
}

impl ConvertedMessages {
    /// Format of this payload
    pub const fn format(&self) -> MessageFormat {
        match self {
            Self::OpenAi(_) => MessageFormat::OpenAi,
            Self::Anthropic(_) => MessageFormat::Anthropic,
            Self::LangChain(_) => MessageFormat::LangChain,
        }
    }

    /// Number of output messages
    pub fn len(&self) -> usize {
        match self {
            Self::OpenAi(messages) => messages.len(),
            Self::Anthropic(messages) => messages.len(),
            Self::LangChain(messages) => messages.len(),
        }
    }

    /// Whether no messages were produced
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encode the payload as a JSON value
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::Encode` if serialization fails.
    pub fn to_json(&self) -> Result<serde_json::Value, ConvertError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Converter for every supported format, selected per call
#[derive(Clone)]
pub struct MessageConverter {
    openai: OpenAiConverter,
    anthropic: AnthropicConverter,
    langchain: LangChainConverter,
}

impl MessageConverter {
    /// Build a converter whose Anthropic path downloads images with `fetcher`
    pub fn new(fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            openai: OpenAiConverter,
            anthropic: AnthropicConverter::new(fetcher),
            langchain: LangChainConverter,
        }
    }

    /// Build a converter that downloads images over HTTP under `config`
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Request` if the HTTP client cannot be built.
    pub fn from_config(config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            openai: OpenAiConverter,
            anthropic: AnthropicConverter::from_config(config)?,
            langchain: LangChainConverter,
        })
    }

    /// Convert `messages` into the payload for `format`
    ///
    /// # Errors
    ///
    /// Reserved; no current conversion path fails.
    pub async fn convert(
        &self,
        format: MessageFormat,
        messages: &[Message],
        asset_urls: &AssetUrls,
    ) -> Result<ConvertedMessages, ConvertError> {
        tracing::debug!(
            format = %format,
            messages = messages.len(),
            assets = asset_urls.len(),
            "converting messages"
        );

        let converted = match format {
            MessageFormat::OpenAi => ConvertedMessages::OpenAi(self.openai.convert(messages, asset_urls).await?),
            MessageFormat::Anthropic => {
                ConvertedMessages::Anthropic(self.anthropic.convert(messages, asset_urls).await?)
            }
            MessageFormat::LangChain => {
                ConvertedMessages::LangChain(self.langchain.convert(messages, asset_urls).await?)
            }
        };

        tracing::debug!(format = %format, output = converted.len(), "conversion finished");

        Ok(converted)
    }
}

/// Text of a message that is exactly one text part
///
/// Shared by every converter: such a message always becomes a bare string.
fn single_text(message: &Message) -> Option<String> {
    message.single_text().map(ToOwned::to_owned)
}
