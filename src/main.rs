//! AppliTrak external-jobs aggregator — binary entrypoint.
//! Boots the Axum HTTP server, wiring providers, routes, and metrics.
//!
//! See `README.md` for quickstart and `DESIGN.md` for architecture notes.

use std::net::SocketAddr;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use applitrak_aggregator::aggregate::config::AggregatorConfig;
use applitrak_aggregator::aggregate::providers::default_providers;
use applitrak_aggregator::api::{create_router, AppState};
use applitrak_aggregator::metrics::Metrics;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("applitrak_aggregator=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();

    let config = AggregatorConfig::load()?;
    let metrics = Metrics::init(config.timeout.as_secs());

    let providers = default_providers(&config)?;
    let state = AppState::new(providers);
    let app = create_router(state).merge(metrics.router());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "external-jobs aggregator listening");
    axum::serve(listener, app).await?;
    Ok(())
}
