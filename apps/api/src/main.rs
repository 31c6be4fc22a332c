mod applications;
mod candidates;
mod config;
mod errors;
mod jobs;
mod matching;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::matching::scoring::RuleBasedScorer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::JsonFileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Flat JSON collections; the jobs file is written by the external scraper
    let store = Arc::new(JsonFileStore::new(
        &config.jobs_file,
        &config.candidates_file,
        &config.matches_file,
        &config.applications_file,
    ));
    info!(
        "Collections: jobs={} candidates={} matches={} applications={}",
        config.jobs_file.display(),
        config.candidates_file.display(),
        config.matches_file.display(),
        config.applications_file.display()
    );

    let scorer = Arc::new(RuleBasedScorer);
    info!(
        "Match scorer: rule_based (min score {}, persist mode {})",
        config.min_match_score, config.match_persist_mode
    );

    // Build app state
    let state = AppState {
        store,
        scorer,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the dashboard host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
