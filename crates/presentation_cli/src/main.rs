//! WaterOps CLI
//!
//! Command-line client for the water utility backend.

#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::Parser;
use infrastructure::{AppConfig, WaterOpsContext, init_tracing};
use presentation_cli::{Cli, execute, log_filter_from_verbosity};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = log_filter_from_verbosity(cli.verbose) {
        config.logging.level = level.to_string();
    }
    init_tracing(&config.logging)?;

    let context = WaterOpsContext::build(config)?;
    let restored = context.start().await?;
    debug!(%restored, "Session loaded");

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling pending requests");
            on_interrupt.cancel();
        }
    });

    let output = execute(cli.command, &context, &cancel).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
