pub mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::watch};
use tower_http::cors::{Any, CorsLayer};

use crate::addon::AddonManifest;
use crate::channel::{ChannelCache, ChannelSource};

pub struct AppState<S> {
    pub cache: Arc<ChannelCache<S>>,
    pub manifest: Arc<AddonManifest>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            manifest: Arc::clone(&self.manifest),
        }
    }
}

/// Build the addon router.
pub fn router<S: ChannelSource + 'static>(state: AppState<S>) -> Router {
    // Addon clients load resources cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index::<S>))
        .route("/manifest.json", get(routes::manifest::<S>))
        .route("/catalog/{kind}/{file}", get(routes::catalog::<S>))
        .route(
            "/catalog/{kind}/{id}/{extra}",
            get(routes::catalog_with_extra::<S>),
        )
        .route("/meta/{kind}/{file}", get(routes::meta::<S>))
        .route("/stream/{kind}/{file}", get(routes::stream::<S>))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP server on an already bound listener until shutdown.
pub async fn run_server<S: ChannelSource + 'static>(
    listener: TcpListener,
    state: AppState<S>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            while !*shutdown_rx.borrow_and_update() {
                if shutdown_rx.changed().await.is_err() {
                    break;
                }
            }
        })
        .await?;

    Ok(())
}
