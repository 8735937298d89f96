use std::io::Read;
use std::path::Path;

use anyhow::Context;
use parley_core::{AssetUrls, Message};
use serde::Deserialize;

/// Document accepted on the command line
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionInput {
    /// Conversation in canonical form
    pub messages: Vec<Message>,
    /// Asset hash to public URL lookup
    #[serde(default)]
    pub asset_urls: AssetUrls,
}

impl ConversionInput {
    /// Read and parse the input document, `-` meaning stdin
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let raw = if path == Path::new("-") {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read input from stdin")?;
            raw
        } else {
            std::fs::read_to_string(path).with_context(|| format!("failed to read input file {}", path.display()))?
        };

        Self::parse(&raw)
    }

    fn parse(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("failed to parse input document")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use parley_core::{PartType, Role};

    use super::*;

    #[test]
    fn asset_urls_are_optional() {
        let input = ConversionInput::parse(r#"{"messages": [{"role": "user", "parts": [{"type": "text", "text": "hi"}]}]}"#)
            .unwrap();

        assert_eq!(input.messages.len(), 1);
        assert_eq!(input.messages[0].role, Role::User);
        assert!(input.asset_urls.is_empty());
    }

    #[test]
    fn reads_file_with_assets() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "messages": [{{
                    "role": "user",
                    "parts": [{{"type": "image", "asset": {{"sha256": "abc123", "mime": "image/png"}}}}]
                }}],
                "asset_urls": {{"abc123": {{"url": "https://example.com/test.png"}}}}
            }}"#
        )
        .unwrap();

        let input = ConversionInput::read(file.path()).unwrap();
        assert_eq!(input.messages[0].parts[0].part_type, PartType::Image);
        assert_eq!(input.asset_urls["abc123"].url, "https://example.com/test.png");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConversionInput::read(Path::new("/nonexistent/parley-input.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/parley-input.json"), "{err}");
    }

    #[test]
    fn malformed_document_is_rejected() {
        let err = ConversionInput::parse(r#"{"conversation": []}"#).unwrap_err();
        assert!(err.to_string().contains("failed to parse input document"));
    }
}
