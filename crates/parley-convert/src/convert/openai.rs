//! Conversion from canonical messages to `OpenAI` chat messages

use async_trait::async_trait;
use parley_core::{AssetUrls, Message, Part, PartMeta, PartType, Role};
use serde_json::Value;

use super::{Converter, single_text};
use crate::error::ConvertError;
use crate::protocol::openai::{
    OpenAiContent, OpenAiContentPart, OpenAiFunctionCall, OpenAiImageUrl, OpenAiMessage, OpenAiToolCall,
};

/// Converts canonical messages to `OpenAI` chat completion messages
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiConverter;

impl OpenAiConverter {
    /// Convert messages without any I/O
    pub fn convert_messages(&self, messages: &[Message], asset_urls: &AssetUrls) -> Vec<OpenAiMessage> {
        messages
            .iter()
            .map(|msg| internal_message_to_openai(msg, asset_urls))
            .collect()
    }
}

#[async_trait]
impl Converter for OpenAiConverter {
    type Output = Vec<OpenAiMessage>;

    async fn convert(&self, messages: &[Message], asset_urls: &AssetUrls) -> Result<Self::Output, ConvertError> {
        Ok(self.convert_messages(messages, asset_urls))
    }
}

/// Map a canonical role to an `OpenAI` role
///
/// Known roles pass through; anything else is sent as `user`.
pub fn openai_role(role: &Role) -> &str {
    match role {
        Role::Other(_) => "user",
        known => known.as_str(),
    }
}

fn internal_message_to_openai(msg: &Message, asset_urls: &AssetUrls) -> OpenAiMessage {
    let role = openai_role(&msg.role).to_owned();
    let tool_call_id = (msg.role == Role::Tool).then(|| tool_call_id(&msg.parts)).flatten();

    if let Some(text) = single_text(msg) {
        return OpenAiMessage {
            role,
            content: Some(OpenAiContent::Text(text)),
            tool_calls: None,
            tool_call_id,
        };
    }

    let mut parts = Vec::with_capacity(msg.parts.len());
    let mut tool_calls = Vec::new();

    for part in &msg.parts {
        match part.part_type {
            PartType::Text => {
                if !part.text.is_empty() {
                    parts.push(OpenAiContentPart::Text {
                        text: part.text.clone(),
                    });
                }
            }
            PartType::Image => {
                if let Some(url) = part.asset.as_ref().and_then(|asset| asset.public_url(asset_urls)) {
                    parts.push(OpenAiContentPart::ImageUrl {
                        image_url: OpenAiImageUrl {
                            url: url.to_owned(),
                            detail: None,
                        },
                    });
                }
            }
            PartType::ToolCall => {
                if let Some(meta) = &part.meta {
                    tool_calls.push(tool_call_to_openai(meta));
                }
            }
            _ => {
                if let Some(text) = fallback_text(part) {
                    parts.push(OpenAiContentPart::Text { text });
                }
            }
        }
    }

    OpenAiMessage {
        role,
        content: if parts.is_empty() {
            None
        } else {
            Some(OpenAiContent::Parts(parts))
        },
        tool_calls: if tool_calls.is_empty() { None } else { Some(tool_calls) },
        tool_call_id,
    }
}

fn tool_call_to_openai(meta: &PartMeta) -> OpenAiToolCall {
    // Arguments already stored as a JSON string are forwarded verbatim
    let arguments = match &meta.arguments {
        Some(Value::String(encoded)) => encoded.clone(),
        Some(args) => serde_json::to_string(args).unwrap_or_else(|_| "{}".to_owned()),
        None => "{}".to_owned(),
    };

    OpenAiToolCall {
        id: meta.id.clone().unwrap_or_default(),
        tool_type: "function".to_owned(),
        function: OpenAiFunctionCall {
            name: meta.tool_name.clone().unwrap_or_default(),
            arguments,
        },
    }
}

/// Text standing in for a part `OpenAI` has no block for
fn fallback_text(part: &Part) -> Option<String> {
    if !part.text.is_empty() {
        return Some(part.text.clone());
    }

    part.meta.as_ref().and_then(|meta| serde_json::to_string(meta).ok())
}

fn tool_call_id(parts: &[Part]) -> Option<String> {
    parts
        .iter()
        .filter(|part| part.part_type == PartType::ToolResult)
        .find_map(|part| part.meta.as_ref()?.tool_call_id.clone())
}
