// src/lib.rs
// Public library surface for integration tests and the binaries.

pub mod api;
pub mod config;
pub mod ingest;
pub mod metrics;
pub mod registry;
pub mod snapshot;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::ingest::aggregate;
pub use crate::ingest::types::{AggregateResponse, NewsItem, SourceResult};
pub use crate::registry::{Format, Region, SourceDescriptor};

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_sources_default, DigestConfig};
use crate::ingest::fetch::HttpFetcher;

/// Compact tracing logs. `RUST_LOG` overrides the default filter.
/// Safe to call more than once (e.g. when the host runtime already installed a subscriber).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("finance_news_digest=info,digest=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

/// Build the full in-process app: registry, HTTP fetcher, config from env, and routes.
pub async fn app() -> anyhow::Result<Router> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    let config = DigestConfig::from_env();
    let sources = load_sources_default().context("loading news sources")?;
    let fetcher = HttpFetcher::new(&config).context("building http client")?;
    info!(
        sources = sources.len(),
        timeout_ms = config.fetch_timeout.as_millis() as u64,
        "news digest configured"
    );

    let state = api::AppState::new(sources, Arc::new(fetcher), config);
    let mut router = api::router(state);
    if metrics::Metrics::enabled() {
        router = router.merge(metrics::Metrics::init()?.router());
    }
    Ok(router)
}
