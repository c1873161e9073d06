//! Invoice Preview Binary
//!
//! # Usage
//!
//! ```bash
//! invoice-preview totals draft.json
//! INVOICE_TIMEZONE=America/New_York invoice-preview overdue invoices.json
//! ```

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use core_kernel::SystemClock;
use interface_cli::{config::CliConfig, run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();
    let Cli { command } = Cli::parse();

    let config = CliConfig::from_env().context("loading INVOICE_* configuration")?;
    init_tracing(&config.log_level);

    tracing::debug!(?command, timezone = %config.timezone, "Running invoice preview");

    let mut stdout = std::io::stdout().lock();
    run(command, &config, Arc::new(SystemClock), &mut stdout).await?;
    Ok(())
}

/// Initializes the tracing subscriber, logging to stderr so stdout stays JSON.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
