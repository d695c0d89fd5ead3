// This is the entry point for the converter web app.
// The lib.rs file holds the pipeline and the HTTP layer.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use heic_converter_lib::cli::Cli;
use heic_converter_lib::server::start_server;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise use defaults based on the verbose flag
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_target(false)       // Remove module path
        .compact()
        .init();

    info!("=== HEIC Converter Starting ===");

    heic_converter_lib::init_codec().context("Failed to initialize libvips")?;

    start_server(cli.server_config())
        .await
        .context("Server stopped with an error")?;

    info!("Application exiting");
    Ok(())
}
