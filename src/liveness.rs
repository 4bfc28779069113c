//! Liveness endpoint polled by the hosting platform.

use std::net::SocketAddr;

use anyhow::Result;
use axum::{routing::get, Router};
use tracing::info;

pub const ALIVE_BODY: &str = "Bot is alive!";

pub fn router() -> Router {
    Router::new().route("/", get(alive))
}

async fn alive() -> &'static str {
    ALIVE_BODY
}

/// Serve the liveness endpoint on all interfaces until the task is dropped
pub async fn serve(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Liveness endpoint listening");
    axum::serve(listener, router()).await?;
    Ok(())
}
