mod api;
mod app;
mod config;
mod error;
mod fetcher;
mod middleware;
mod model;
mod service;
mod telemetry;
mod util;

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::AppConfig::from_env().context("failed to load configuration")?;
    telemetry::init(&config.logging)?;

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {:?}", config.server.bind))?;
    let router = app::build_router(&config)?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "reading-time service listening");
    axum::serve(listener, router).await.context("server failed")
}
