use parley_core::MessageFormat;
use serde::Deserialize;

/// Conversion defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertConfig {
    /// Format used when the caller does not name one
    #[serde(default = "default_format")]
    pub default_format: MessageFormat,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
        }
    }
}

const fn default_format() -> MessageFormat {
    MessageFormat::OpenAi
}
