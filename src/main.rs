//! tmi-decode - decode Twitch chat transcripts into JSON records.
//!
//! Usage: `tmi-decode [config.toml] [input]`
//!
//! Reads raw chat lines from `input` (or the configured path, or stdin),
//! writes one JSON object per decoded line to stdout, and logs dropped lines
//! to stderr.

mod config;
mod pipeline;
mod telemetry;

use crate::config::Config;
use anyhow::Context;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let input_override = args.next();

    let mut config = match &config_path {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path))?,
        None => Config::default(),
    };
    if let Some(input) = input_override {
        config.input.path = Some(input.into());
    }

    telemetry::init(&config.log);

    info!(
        config = config_path.as_deref().unwrap_or("<defaults>"),
        input = %config
            .input
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<stdin>".to_string()),
        "Starting tmi-decode"
    );

    let stdout = tokio::io::stdout();
    let result = match &config.input.path {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening {}", path.display()))?;
            pipeline::run(file, stdout, &config).await
        }
        None => pipeline::run(tokio::io::stdin(), stdout, &config).await,
    };

    let stats = result.map_err(|e| {
        error!(error = %e, "Decoding stopped");
        e
    })?;

    info!(
        decoded = stats.decoded,
        ignored = stats.ignored,
        failed = stats.failed,
        "Finished"
    );

    Ok(())
}
