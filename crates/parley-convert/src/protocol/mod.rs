//! Wire format types for provider-specific message payloads
//!
//! Each module contains pure serde structs matching the respective provider's
//! JSON message shape. Content that may be either a bare string or a list of
//! blocks is modelled as an untagged two-case enum so both shapes serialize
//! exactly as the provider expects.

pub mod anthropic;
pub mod langchain;
pub mod openai;
