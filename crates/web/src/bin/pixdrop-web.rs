//! pixdrop web server entry point.
//!
//! This binary starts an Axum HTTP server that accepts image uploads over
//! `/ws` and serves the single-page application for every other path.

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::fmt;

use pixdrop_web::cli::Cli;
use pixdrop_web::WebServer;

/// Main entry point.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    fmt().with_max_level(cli.log_level()).with_target(false).init();

    if let Err(err) = run(cli).await {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    info!(
        "Starting pixdrop web server (built {}, commit {})",
        env!("PIXDROP_BUILD_TIMESTAMP"),
        option_env!("PIXDROP_GIT_COMMIT").unwrap_or("unknown")
    );

    let config = cli.load_config().context("Failed to load configuration")?;
    let server = WebServer::new(config).context("Invalid configuration")?;
    server.run().await?;

    Ok(())
}
