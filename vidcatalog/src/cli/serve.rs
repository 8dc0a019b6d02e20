use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::{net::TcpListener, signal, sync::watch, task::JoinHandle};
use tracing::{error, info};

use crate::addon::AddonManifest;
use crate::channel::{ChannelCache, HttpSource, StalePolicy};
use crate::server::AppState;

use super::DEFAULT_ORIGIN_URL;

#[derive(Parser, Debug)]
pub struct ServeCommand {
    /// HTTP server port
    #[arg(short, long, env = "PORT", default_value = "63819")]
    pub port: u16,

    /// URL of the JSON channel list
    #[arg(long, env = "ORIGIN_URL", default_value = DEFAULT_ORIGIN_URL)]
    pub origin_url: String,

    /// Seconds a fetched channel list stays fresh
    #[arg(long, env = "CACHE_TTL", default_value = "14400")]
    pub cache_ttl: u64,

    /// Timeout in seconds for fetching the channel list (none by default)
    #[arg(long, env = "ORIGIN_TIMEOUT")]
    pub origin_timeout: Option<u64>,

    /// Serve the last good channel list when a refresh fails
    #[arg(long, env = "SERVE_STALE")]
    pub serve_stale: bool,
}

impl ServeCommand {
    pub async fn run(self) -> Result<()> {
        // Shutdown signal
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let source = HttpSource::new(
            &self.origin_url,
            self.origin_timeout.map(Duration::from_secs),
        )?;
        let stale_policy = if self.serve_stale {
            StalePolicy::ServeStale
        } else {
            StalePolicy::Empty
        };
        let cache = Arc::new(
            ChannelCache::new(source, Duration::from_secs(self.cache_ttl))
                .with_stale_policy(stale_policy),
        );

        // Published once, never recomputed
        let manifest = Arc::new(AddonManifest::new());

        info!(
            origin = %self.origin_url,
            ttl_secs = self.cache_ttl,
            ?stale_policy,
            "channel cache configured"
        );

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind HTTP server to {addr}"))?;

        info!(
            "Addon is running at: http://127.0.0.1:{}/manifest.json",
            self.port
        );

        let server_handle = {
            let state = AppState { cache, manifest };
            tokio::spawn(crate::server::run_server(listener, state, shutdown_rx))
        };

        wait_for_exit(server_handle, signal::ctrl_c(), shutdown_tx).await?;

        info!("Done.");
        Ok(())
    }
}

/**
    Wait for either Ctrl+C or the server task to end.

    On the signal the server is asked to shut down gracefully and awaited.
    If the server ends first, its error (or panic) ends the process instead
    of leaving it waiting for a signal with nothing listening.
*/
async fn wait_for_exit(
    mut server_handle: JoinHandle<Result<()>>,
    shutdown_signal: impl Future<Output = io::Result<()>>,
    shutdown_tx: watch::Sender<bool>,
) -> Result<()> {
    tokio::select! {
        result = &mut server_handle => {
            let result = result.context("HTTP server task panicked")?;
            if let Err(e) = &result {
                error!(error = %e, "HTTP server failed");
            }
            return result.context("HTTP server stopped");
        }
        signal = shutdown_signal => {
            signal.context("Failed to listen for Ctrl+C")?;
        }
    }

    info!("Shutting down...");
    let _ = shutdown_tx.send(true);
    server_handle.await.context("HTTP server task panicked")?
}
