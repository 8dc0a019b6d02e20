use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod addon;
mod channel;
mod cli;
mod server;
mod util;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    cli::Args::parse().run().await
}
