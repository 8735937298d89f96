//! Anthropic Messages API message wire format types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Anthropic message
///
/// Only `user` and `assistant` roles exist; system prompts travel in the
/// request's top-level `system` field and never appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicMessage {
    /// Role ("user" or "assistant")
    pub role: String,
    /// Content, `null` when the source message had no parts
    pub content: Option<AnthropicContent>,
}

/// Anthropic content can be a string or array of content blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnthropicContent {
    /// Plain text (shorthand)
    Text(String),
    /// Array of content blocks
    Blocks(Vec<AnthropicContentBlock>),
}

/// Content block in an Anthropic message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicContentBlock {
    /// Text content
    Text {
        /// The text string
        text: String,
    },
    /// Image content
    Image {
        /// Image source
        source: AnthropicImageSource,
    },
    /// Tool use request from the assistant
    ToolUse {
        /// Tool use identifier
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// Tool name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Tool input object
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input: Option<Map<String, Value>>,
    },
    /// Tool result sent back by the user
    ToolResult {
        /// Tool use ID this result responds to
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_use_id: Option<String>,
        /// Result content
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        /// Whether the tool call errored
        #[serde(default, skip_serializing_if = "is_false")]
        is_error: bool,
    },
}

/// Anthropic image source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicImageSource {
    /// Inline image bytes
    Base64 {
        /// Media type (e.g. "image/png")
        media_type: String,
        /// Base64-encoded image data
        data: String,
    },
    /// Image referenced by URL
    Url {
        /// Media type (e.g. "image/png")
        media_type: String,
        /// Image URL
        url: String,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}
