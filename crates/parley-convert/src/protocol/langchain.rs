//! LangChain chat message types
//!
//! Mirrors the LangChain chat message family: human, AI, system, tool and
//! generic messages. Content is always a plain string at this layer; rich
//! content is carried as a JSON-encoded array of [`LangChainContentPart`].

use parley_core::PartMeta;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Kind of a LangChain chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ChatMessageType {
    /// Message from the end user
    Human,
    /// Message from the model
    Ai,
    /// System instruction
    System,
    /// Tool output
    Tool,
    /// Message with a custom role label
    Generic,
}

/// LangChain chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LangChainMessage {
    /// Message from the end user
    Human {
        /// Message text
        content: String,
    },
    /// Message from the model
    Ai {
        /// Message text
        content: String,
        /// Tool invocations requested by the model
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<LangChainToolCall>,
    },
    /// System instruction
    System {
        /// Message text
        content: String,
    },
    /// Tool output
    Tool {
        /// Identifier of the call this output answers
        tool_call_id: String,
        /// Message text
        content: String,
    },
    /// Message with a custom role label
    Generic {
        /// Role label as stored
        role: String,
        /// Message text
        content: String,
    },
}

impl LangChainMessage {
    /// Kind of this message
    pub const fn message_type(&self) -> ChatMessageType {
        match self {
            Self::Human { .. } => ChatMessageType::Human,
            Self::Ai { .. } => ChatMessageType::Ai,
            Self::System { .. } => ChatMessageType::System,
            Self::Tool { .. } => ChatMessageType::Tool,
            Self::Generic { .. } => ChatMessageType::Generic,
        }
    }

    /// Message text
    pub fn content(&self) -> &str {
        match self {
            Self::Human { content }
            | Self::Ai { content, .. }
            | Self::System { content }
            | Self::Tool { content, .. }
            | Self::Generic { content, .. } => content,
        }
    }

    /// Tool calls carried by an AI message, empty for every other kind
    pub fn tool_calls(&self) -> &[LangChainToolCall] {
        match self {
            Self::Ai { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }
}

/// Tool invocation attached to an AI message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangChainToolCall {
    /// Tool call identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Invoked function, absent when the tool name is unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<LangChainFunctionCall>,
}

/// Function name and arguments of a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangChainFunctionCall {
    /// Function name
    pub name: String,
    /// JSON-encoded arguments, empty when none were recorded
    #[serde(default)]
    pub arguments: String,
}

/// One entry of the JSON array used as rich message content
#[derive(Debug, Serialize)]
pub struct LangChainContentPart<'a> {
    /// Part type name
    #[serde(rename = "type")]
    pub part_type: &'a str,
    /// Text payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    /// Resolved asset URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
    /// Original asset file name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<&'a str>,
    /// Asset MIME type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<&'a str>,
    /// Tool metadata; `Some(None)` is written as `null`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Option<&'a PartMeta>>,
}

impl<'a> LangChainContentPart<'a> {
    /// An entry carrying only the part type
    pub const fn new(part_type: &'a str) -> Self {
        Self {
            part_type,
            text: None,
            url: None,
            filename: None,
            mime: None,
            meta: None,
        }
    }
}
