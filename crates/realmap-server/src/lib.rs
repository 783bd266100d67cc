//! HTTP backend for the realmap viewer.
//!
//! Serves layer listings as GeoJSON and feature details as small JSON values
//! from a read-only [`GeoStore`] shared behind an `Arc`.

pub mod error;
pub mod handlers;

use axum::{routing::get, Router};
use realmap_core::GeoStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

pub use error::ApiError;

/// Application state shared across all handlers.
pub struct AppState {
    pub store: Arc<GeoStore>,
}

impl AppState {
    pub fn new(store: impl Into<Arc<GeoStore>>) -> Self {
        Self {
            store: store.into(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/status", get(handlers::status))
        .route("/time", get(handlers::time))
        // `:key` is a layer type on the listing and an id on the summary.
        .route("/locations/:key", get(handlers::locations_by_type))
        .route("/locations/:key/summary", get(handlers::location_summary))
        .route("/regions", get(handlers::regions))
        .route("/regions/:id/size", get(handlers::region_size))
        .route("/regions/:id/summary", get(handlers::region_summary))
        .route("/regions/:id/areas", get(handlers::region_areas))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn bind(host: &str, port: u16) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    Ok(TcpListener::bind(addr).await?)
}

/// Start the server in the background.
///
/// Returns the actual address the server is bound to (useful when port=0).
pub async fn start_server(store: impl Into<Arc<GeoStore>>, host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let listener = bind(host, port).await?;
    let actual_addr = listener.local_addr()?;
    let app = create_router(AppState::new(store));

    info!("Server listening on {}", actual_addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {e}");
        }
    });

    Ok(actual_addr)
}

/// Serve in the foreground until Ctrl-C.
pub async fn run_server(store: impl Into<Arc<GeoStore>>, host: &str, port: u16) -> anyhow::Result<()> {
    let listener = bind(host, port).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(AppState::new(store)))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {e}");
            }
        })
        .await?;

    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_starts() {
        let addr = start_server(GeoStore::default(), "127.0.0.1", 0).await.unwrap();
        assert!(addr.port() > 0);
    }

    #[tokio::test]
    async fn bad_host_is_an_error() {
        assert!(start_server(GeoStore::default(), "not a host", 0).await.is_err());
    }
}
