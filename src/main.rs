//! Restoration Tracker — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.
//!
//! See `README.md` for quickstart.

use std::sync::Arc;

use restoration_tracker::api::{self, AppState};
use restoration_tracker::config::TrackerConfig;
use restoration_tracker::metrics::Metrics;
use restoration_tracker::store::CsvStore;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("restoration_tracker=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments. This enables
    // TRACKER_CONFIG_PATH / TRACKER_DATA_PATH from .env.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = TrackerConfig::load()?;
    tracing::info!(data_path = %cfg.data_path.display(), "record store configured");

    let prometheus = Metrics::init();

    let state = AppState::new(Arc::new(CsvStore::new(cfg.data_path)), cfg.history_cap);
    let app = api::router(state).merge(prometheus.router());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "restoration tracker listening");
    axum::serve(listener, app).await?;
    Ok(())
}
