#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod input;

use anyhow::Context;
use args::Args;
use clap::Parser;
use input::ConversionInput;
use parley_config::Config;
use parley_convert::MessageConverter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    parley_telemetry::init(&config.logging, args.log_filter.as_deref())?;

    let format = args.format.unwrap_or(config.convert.default_format);
    let input = ConversionInput::read(&args.input)?;

    tracing::info!(
        format = %format,
        messages = input.messages.len(),
        fetch_enabled = config.fetch.enabled,
        "converting conversation"
    );

    let converter = MessageConverter::from_config(&config.fetch).context("failed to build image fetcher")?;
    let converted = converter.convert(format, &input.messages, &input.asset_urls).await?;

    let payload = converted.to_json()?;
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };

    println!("{rendered}");

    Ok(())
}
