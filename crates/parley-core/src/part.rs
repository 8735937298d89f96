use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::asset::Asset;
use crate::de::null_as_default;

/// Discriminator of a message part
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartType {
    /// Plain text
    Text,
    /// Image asset
    Image,
    /// Audio asset
    Audio,
    /// Video asset
    Video,
    /// Arbitrary file asset
    File,
    /// Tool invocation requested by the model
    ToolCall,
    /// Outcome of a tool invocation
    ToolResult,
    /// Structured data payload
    Data,
    /// Any other part type
    Other(String),
}

impl PartType {
    /// Wire name of the part type
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::File => "file",
            Self::ToolCall => "tool-call",
            Self::ToolResult => "tool-result",
            Self::Data => "data",
            Self::Other(kind) => kind,
        }
    }

    /// Whether parts of this type reference a binary asset
    pub const fn is_media(&self) -> bool {
        matches!(self, Self::Image | Self::Audio | Self::Video | Self::File)
    }
}

impl From<&str> for PartType {
    fn from(kind: &str) -> Self {
        match kind {
            "text" => Self::Text,
            "image" => Self::Image,
            "audio" => Self::Audio,
            "video" => Self::Video,
            "file" => Self::File,
            "tool-call" => Self::ToolCall,
            "tool-result" => Self::ToolResult,
            "data" => Self::Data,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for PartType {
    fn from(kind: String) -> Self {
        match Self::from(kind.as_str()) {
            Self::Other(_) => Self::Other(kind),
            known => known,
        }
    }
}

impl From<PartType> for String {
    fn from(kind: PartType) -> Self {
        match kind {
            PartType::Other(kind) => kind,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tool metadata attached to a part
///
/// The stored representation is an open JSON object. Keys with a known
/// meaning are lifted into typed fields; everything else, including a known
/// key holding a value of an unexpected JSON type, stays in `extra`. Parsing
/// therefore never fails on odd metadata, and serialization reproduces a
/// single flat object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct PartMeta {
    /// Tool call identifier (on tool-call parts)
    pub id: Option<String>,
    /// Name of the invoked tool
    pub tool_name: Option<String>,
    /// Raw tool arguments, usually an object
    pub arguments: Option<Value>,
    /// Identifier of the call a tool result answers
    pub tool_call_id: Option<String>,
    /// Raw tool output
    pub result: Option<Value>,
    /// Whether the tool invocation failed
    pub is_error: Option<bool>,
    /// Unrecognized keys
    pub extra: Map<String, Value>,
}

impl PartMeta {
    /// Metadata for a tool invocation
    pub fn tool_call(id: impl Into<String>, tool_name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: Some(id.into()),
            tool_name: Some(tool_name.into()),
            arguments: Some(arguments),
            ..Self::default()
        }
    }

    /// Metadata for a tool result
    pub fn tool_result(tool_call_id: impl Into<String>, result: Value) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            result: Some(result),
            ..Self::default()
        }
    }

    /// The whole metadata as a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(self.clone().into())
    }
}

impl From<Map<String, Value>> for PartMeta {
    fn from(mut map: Map<String, Value>) -> Self {
        let id = take_string(&mut map, "id");
        let tool_name = take_string(&mut map, "tool_name");
        let tool_call_id = take_string(&mut map, "tool_call_id");
        let is_error = match map.remove("is_error") {
            Some(Value::Bool(flag)) => Some(flag),
            Some(other) => {
                map.insert("is_error".to_owned(), other);
                None
            }
            None => None,
        };

        Self {
            id,
            tool_name,
            arguments: map.remove("arguments"),
            tool_call_id,
            result: map.remove("result"),
            is_error,
            extra: map,
        }
    }
}

impl From<PartMeta> for Map<String, Value> {
    fn from(meta: PartMeta) -> Self {
        let mut map = meta.extra;

        let known = [
            ("id", meta.id.map(Value::String)),
            ("tool_name", meta.tool_name.map(Value::String)),
            ("arguments", meta.arguments),
            ("tool_call_id", meta.tool_call_id.map(Value::String)),
            ("result", meta.result),
            ("is_error", meta.is_error.map(Value::Bool)),
        ];

        for (key, value) in known {
            if let Some(value) = value {
                map.insert(key.to_owned(), value);
            }
        }

        map
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key)? {
        Value::String(value) => Some(value),
        other => {
            map.insert(key.to_owned(), other);
            None
        }
    }
}

/// One typed content unit within a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Part discriminator
    #[serde(rename = "type")]
    pub part_type: PartType,
    /// Text payload, empty when absent
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Referenced binary asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<Asset>,
    /// Original file name of the asset, empty when absent
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub filename: String,
    /// Tool metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PartMeta>,
}

impl Part {
    /// Create an empty part of the given type
    pub fn new(part_type: impl Into<PartType>) -> Self {
        Self {
            part_type: part_type.into(),
            text: String::new(),
            asset: None,
            filename: String::new(),
            meta: None,
        }
    }

    /// A plain text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new(PartType::Text)
        }
    }

    /// A media part of the given type referencing an asset
    pub fn media(part_type: PartType, asset: Asset) -> Self {
        Self {
            asset: Some(asset),
            ..Self::new(part_type)
        }
    }

    /// An image part referencing an asset
    pub fn image(asset: Asset) -> Self {
        Self::media(PartType::Image, asset)
    }

    /// A tool invocation part
    pub fn tool_call(meta: PartMeta) -> Self {
        Self {
            meta: Some(meta),
            ..Self::new(PartType::ToolCall)
        }
    }

    /// A tool result part
    pub fn tool_result(meta: PartMeta) -> Self {
        Self {
            meta: Some(meta),
            ..Self::new(PartType::ToolResult)
        }
    }

    /// Set the file name
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Set the text payload
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Whether this is a text part
    pub fn is_text(&self) -> bool {
        self.part_type == PartType::Text
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn part_types_use_kebab_case_names() {
        let part: Part = serde_json::from_value(json!({"type": "tool-call"})).unwrap();
        assert_eq!(part.part_type, PartType::ToolCall);

        let part: Part = serde_json::from_value(json!({"type": "hologram"})).unwrap();
        assert_eq!(part.part_type, PartType::Other("hologram".to_owned()));
        assert_eq!(part.part_type.as_str(), "hologram");
    }

    #[test]
    fn meta_lifts_known_keys() {
        let meta: PartMeta = serde_json::from_value(json!({
            "id": "call_123",
            "tool_name": "get_weather",
            "arguments": {"location": "San Francisco"},
            "trace": "abc",
        }))
        .unwrap();

        assert_eq!(meta.id.as_deref(), Some("call_123"));
        assert_eq!(meta.tool_name.as_deref(), Some("get_weather"));
        assert_eq!(meta.arguments, Some(json!({"location": "San Francisco"})));
        assert_eq!(meta.extra.get("trace"), Some(&json!("abc")));
        assert!(meta.tool_call_id.is_none());
    }

    #[test]
    fn mistyped_known_keys_stay_in_extra() {
        let meta: PartMeta = serde_json::from_value(json!({
            "id": 42,
            "is_error": "yes",
        }))
        .unwrap();

        assert!(meta.id.is_none());
        assert!(meta.is_error.is_none());
        assert_eq!(meta.extra.get("id"), Some(&json!(42)));
        assert_eq!(meta.extra.get("is_error"), Some(&json!("yes")));
    }

    #[test]
    fn meta_serializes_as_flat_object() {
        let mut meta = PartMeta::tool_result("call_123", json!("sunny"));
        meta.extra.insert("latency_ms".to_owned(), json!(12));

        assert_eq!(
            meta.to_value(),
            json!({"tool_call_id": "call_123", "result": "sunny", "latency_ms": 12})
        );
    }

    #[test]
    fn null_strings_read_as_empty() {
        let part: Part = serde_json::from_value(json!({
            "type": "image",
            "text": null,
            "filename": null,
            "asset": {"sha256": "abc123", "mime": null},
        }))
        .unwrap();

        assert_eq!(part.text, "");
        assert_eq!(part.filename, "");
        assert_eq!(part.asset.unwrap().mime, "");
    }

    #[test]
    fn null_meta_is_absent() {
        let part: Part = serde_json::from_value(json!({"type": "tool-call", "meta": null})).unwrap();
        assert!(part.meta.is_none());
    }
}
