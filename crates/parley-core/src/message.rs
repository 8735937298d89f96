use std::fmt;

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;
use crate::part::Part;

/// Role of a message author
///
/// Stored upstream as an open string. Unrecognized roles are kept verbatim in
/// [`Role::Other`] so each converter can decide how to map them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// End user
    User,
    /// Model response
    Assistant,
    /// System instruction
    System,
    /// Tool execution result
    Tool,
    /// Legacy function-call result
    Function,
    /// Any other role label
    Other(String),
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
            Self::Tool => "tool",
            Self::Function => "function",
            Self::Other(role) => role,
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        match role {
            "user" => Self::User,
            "assistant" => Self::Assistant,
            "system" => Self::System,
            "tool" => Self::Tool,
            "function" => Self::Function,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match Self::from(role.as_str()) {
            Self::Other(_) => Self::Other(role),
            known => known,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a stored conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message author
    pub role: Role,
    /// Ordered content parts
    #[serde(default, deserialize_with = "null_as_default")]
    pub parts: Vec<Part>,
}

impl Message {
    /// Create a message from a role and its parts
    pub fn new(role: impl Into<Role>, parts: Vec<Part>) -> Self {
        Self {
            role: role.into(),
            parts,
        }
    }

    /// Create a message holding a single text part
    pub fn text(role: impl Into<Role>, text: impl Into<String>) -> Self {
        Self::new(role, vec![Part::text(text)])
    }

    /// The text of the only part, when the message is exactly one text part
    ///
    /// Every converter collapses such messages to a bare string.
    pub fn single_text(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [part] if part.is_text() => Some(part.text.as_str()),
            _ => None,
        }
    }
}
