//! Message format conversion for Parley
//!
//! Turns canonical conversations into the message payloads expected by
//! `OpenAI` chat completions, the Anthropic Messages API and LangChain chat
//! messages. Conversion is best-effort: a part that cannot be represented is
//! degraded or dropped, never turned into an error.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod error;
pub mod fetch;
pub mod protocol;

#[cfg(test)]
mod test_support;

pub use convert::{
    AnthropicConverter, ConvertedMessages, Converter, LangChainConverter, MessageConverter, OpenAiConverter,
};
pub use error::{ConvertError, FetchError};
pub use fetch::{HttpImageFetcher, ImageFetcher};
