#![allow(clippy::must_use_candidate)]

pub mod convert;
mod env;
pub mod fetch;
mod loader;
pub mod logging;

use serde::Deserialize;

pub use convert::*;
pub use fetch::*;
pub use logging::*;

/// Top-level Parley configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Conversion defaults
    #[serde(default)]
    pub convert: ConvertConfig,
    /// Image fetching for inline payloads
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}
