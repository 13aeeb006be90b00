// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run-Tracker API Server
//!
//! Records runs from streamed location fixes, stores completed runs, and
//! serves the statistics dashboard.

use run_tracker::{config::Config, db::RunDb, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Run-Tracker API");

    // Open the run store
    let db = match &config.runs_file {
        Some(path) => RunDb::open(path).await?,
        None => {
            tracing::warn!("RUNS_FILE not set, runs are kept in memory only");
            RunDb::in_memory()
        }
    };
    tracing::info!(count = db.count(), "Run store ready");

    // Build shared state
    let port = config.port;
    let state = Arc::new(AppState::new(config, db));

    // Build router
    let app = run_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("run_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
