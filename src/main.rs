//! # layerdesk Main Entry Point
//!
//! Console admin client for map layer metadata.

use anyhow::Result;
use layerdesk::cmd_args::CommandLineArgs;
use layerdesk::config;
use layerdesk::AppController;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();

    // Logs go to stderr so they never interleave with the panels
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config::log_filter(cmd_args.verbose())))
        .with_writer(std::io::stderr)
        .init();

    let mut app = AppController::new(&cmd_args)?;
    app.run().await?;

    Ok(())
}
