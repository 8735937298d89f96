//! Conversion from canonical messages to LangChain chat messages

use async_trait::async_trait;
use parley_core::{AssetUrls, Message, Part, PartType, Role};

use super::{Converter, single_text};
use crate::error::ConvertError;
use crate::protocol::langchain::{LangChainContentPart, LangChainFunctionCall, LangChainMessage, LangChainToolCall};

/// Converts canonical messages to LangChain chat messages
#[derive(Debug, Clone, Copy, Default)]
pub struct LangChainConverter;

impl LangChainConverter {
    /// Convert messages without any I/O
    pub fn convert_messages(&self, messages: &[Message], asset_urls: &AssetUrls) -> Vec<LangChainMessage> {
        messages
            .iter()
            .map(|msg| internal_message_to_langchain(msg, asset_urls))
            .collect()
    }
}

#[async_trait]
impl Converter for LangChainConverter {
    type Output = Vec<LangChainMessage>;

    async fn convert(&self, messages: &[Message], asset_urls: &AssetUrls) -> Result<Self::Output, ConvertError> {
        Ok(self.convert_messages(messages, asset_urls))
    }
}

fn internal_message_to_langchain(msg: &Message, asset_urls: &AssetUrls) -> LangChainMessage {
    let content = message_content(msg, asset_urls);

    match &msg.role {
        Role::User => LangChainMessage::Human { content },
        Role::Assistant => LangChainMessage::Ai {
            content,
            tool_calls: tool_calls(&msg.parts),
        },
        Role::Function => LangChainMessage::Ai {
            content,
            tool_calls: Vec::new(),
        },
        Role::System => LangChainMessage::System { content },
        Role::Tool => LangChainMessage::Tool {
            tool_call_id: tool_call_id(&msg.parts),
            content,
        },
        Role::Other(role) => LangChainMessage::Generic {
            role: role.clone(),
            content,
        },
    }
}

/// Flatten message parts into LangChain's single content string
///
/// A lone text part is used verbatim; anything richer becomes a JSON array
/// with one object per part.
fn message_content(msg: &Message, asset_urls: &AssetUrls) -> String {
    if msg.parts.is_empty() {
        return String::new();
    }

    if let Some(text) = single_text(msg) {
        return text;
    }

    let parts: Vec<_> = msg.parts.iter().map(|part| content_part(part, asset_urls)).collect();

    serde_json::to_string(&parts).unwrap_or_default()
}

fn content_part<'a>(part: &'a Part, asset_urls: &'a AssetUrls) -> LangChainContentPart<'a> {
    let mut entry = LangChainContentPart::new(part.part_type.as_str());
    let text = Some(part.text.as_str()).filter(|text| !text.is_empty());

    match part.part_type {
        PartType::Text => {
            entry.text = Some(&part.text);
        }
        PartType::Image | PartType::Audio | PartType::Video | PartType::File => {
            if let Some(asset) = &part.asset {
                entry.url = asset.public_url(asset_urls);
                entry.filename = Some(&part.filename);
                entry.mime = Some(&asset.mime);
            }
            entry.text = text;
        }
        PartType::ToolCall | PartType::ToolResult | PartType::Data => {
            entry.meta = Some(part.meta.as_ref());
            entry.text = text;
        }
        PartType::Other(_) => {}
    }

    entry
}

/// Tool invocations of an assistant message, in part order
fn tool_calls(parts: &[Part]) -> Vec<LangChainToolCall> {
    parts
        .iter()
        .filter(|part| part.part_type == PartType::ToolCall)
        .filter_map(|part| part.meta.as_ref())
        .map(|meta| {
            let arguments = meta
                .arguments
                .as_ref()
                .and_then(|args| serde_json::to_string(args).ok())
                .unwrap_or_default();

            LangChainToolCall {
                id: meta.id.clone(),
                function: meta
                    .tool_name
                    .clone()
                    .map(|name| LangChainFunctionCall { name, arguments }),
            }
        })
        .collect()
}

/// Call identifier answered by a tool message, empty when none is recorded
fn tool_call_id(parts: &[Part]) -> String {
    parts
        .iter()
        .filter(|part| part.part_type == PartType::ToolResult)
        .find_map(|part| part.meta.as_ref()?.tool_call_id.clone())
        .unwrap_or_default()
}
