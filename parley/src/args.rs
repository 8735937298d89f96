use std::path::PathBuf;

use clap::Parser;
use parley_core::MessageFormat;

/// Parley message converter
#[derive(Debug, Parser)]
#[command(
    name = "parley",
    about = "Convert canonical conversations into OpenAI, Anthropic or LangChain messages"
)]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "PARLEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Target message format, overriding `convert.default_format`
    #[arg(short, long, env = "PARLEY_FORMAT")]
    pub format: Option<MessageFormat>,

    /// Input document, `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,

    /// Override the log filter, e.g. `debug` or `parley_convert=trace`
    #[arg(long)]
    pub log_filter: Option<String>,
}
