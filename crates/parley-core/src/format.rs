use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;

/// Target wire format for a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    /// `OpenAI` chat completions
    OpenAi,
    /// Anthropic Claude Messages API
    Anthropic,
    /// LangChain chat messages
    LangChain,
}

/// A format name that does not match any [`MessageFormat`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown message format `{name}` (expected one of: {expected})")]
pub struct UnknownFormat {
    /// The rejected name
    pub name: String,
    /// Comma-separated list of accepted names
    pub expected: String,
}

impl FromStr for MessageFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::iter()
            .find(|format| format.to_string().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownFormat {
                name: name.to_owned(),
                expected: Self::iter().map(|f| f.to_string()).collect::<Vec<_>>().join(", "),
            })
    }
}
