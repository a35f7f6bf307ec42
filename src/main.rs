// src/main.rs

use std::{net::UdpSocket, sync::Arc};

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod clock;
mod config;
mod db;
mod error;
mod models;
mod queries;
mod routes;
#[cfg(test)]
mod test_support;

use clock::{Clock, SystemClock};
use config::Config;
use db::{ConnectionProvider, QueryExecutor, SqliteExecutor};

#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<dyn QueryExecutor>,
    pub clock: Arc<dyn Clock>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .init();

    let cfg = Config::from_env();

    // One connection per query; the probe only reports an unreachable store early
    let provider = ConnectionProvider::new(&cfg.database_url)?;
    match provider.ping().await {
        Ok(()) => tracing::info!(database_url = %cfg.database_url, "store reachable"),
        Err(e) => tracing::warn!(database_url = %cfg.database_url, error = %e, "store not reachable yet"),
    }

    let state = AppState {
        executor: Arc::new(SqliteExecutor::new(provider)),
        clock: Arc::new(SystemClock),
    };
    let app = routes::router(state);

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    let local_ip = local_ip();
    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!("🚀 E-commerce Analytics Dashboard is running!");
    println!("{rule}");
    println!("📱 Access from other devices:");
    println!("   http://{local_ip}:{}", cfg.port);
    println!("   http://localhost:{}", cfg.port);
    println!("{rule}\n");
    tracing::info!(%addr, "listening");

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Outbound-facing address, for the banner only. Connecting a UDP socket sends nothing.
fn local_ip() -> String {
    UdpSocket::bind("0.0.0.0:0")
        .and_then(|socket| {
            socket.connect("8.8.8.8:80")?;
            socket.local_addr()
        })
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|_| "localhost".into())
}
