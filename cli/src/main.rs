mod args;
mod commands;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they don't mix with listings on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    debug!(
        "filechooser {} running {:?}",
        env!("CARGO_PKG_VERSION"),
        cli.command
    );
    commands::run(cli).await
}
