//! HTTP server exposing the resolver.
//!
//! Two endpoints:
//! - `GET /resolve?url=...` runs a guarded resolution and returns the chain
//! - `GET /health` liveness probe
//!
//! The server binds on all interfaces; resolution failures are mapped onto
//! HTTP status codes by the handler, so the process stays up regardless of
//! what individual resolutions do.

mod handlers;

use std::sync::Arc;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use log::info;
use tokio::net::TcpListener;

use crate::fetch::RedirectResolver;
use handlers::{health_handler, resolve_handler};

/// Builds the application router over a shared resolver.
pub fn router(resolver: Arc<RedirectResolver>) -> Router {
    Router::new()
        .route("/resolve", get(resolve_handler))
        .route("/health", get(health_handler))
        .with_state(resolver)
}

/// Serves requests on an already-bound listener until the process exits.
pub async fn serve(listener: TcpListener, resolver: Arc<RedirectResolver>) -> anyhow::Result<()> {
    axum::serve(listener, router(resolver))
        .await
        .context("HTTP server terminated")
}

/// Binds the service port and serves forever.
pub async fn start_server(port: u16, resolver: Arc<RedirectResolver>) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("🚀 Listening on http://{addr}");
    info!("   Resolve endpoint: http://localhost:{port}/resolve?url=...");
    serve(listener, resolver).await
}
