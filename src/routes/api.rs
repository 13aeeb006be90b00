// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for stored runs and statistics.

use crate::db::SortType;
use crate::error::{AppError, Result};
use crate::models::{Run, RunStats, RunSummary, StatsDisplay};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/runs", get(get_runs))
        .route("/api/runs/{id}", get(get_run).delete(delete_run))
        .route("/api/stats", get(get_stats))
}

// ─── Runs ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RunsQuery {
    /// date | time | distance | speed | calories
    #[serde(default)]
    sort: SortType,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunsResponse {
    pub runs: Vec<RunSummary>,
    pub total: u32,
}

/// List runs (without images) in the requested order.
async fn get_runs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RunsQuery>,
) -> Result<Json<RunsResponse>> {
    tracing::debug!(sort = ?params.sort, "Fetching runs");

    let runs: Vec<RunSummary> = state
        .db
        .list_runs(params.sort)
        .iter()
        .map(RunSummary::from)
        .collect();

    Ok(Json(RunsResponse {
        total: u32::try_from(runs.len()).unwrap_or(u32::MAX),
        runs,
    }))
}

/// Full run record, including the map snapshot.
async fn get_run(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Result<Json<Run>> {
    state
        .db
        .get_run(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Run {} not found", id)))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteRunResponse {
    pub success: bool,
}

async fn delete_run(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteRunResponse>> {
    if !state.db.delete_run(id).await? {
        return Err(AppError::NotFound(format!("Run {} not found", id)));
    }

    tracing::info!(run_id = id, "Run deleted by user");
    Ok(Json(DeleteRunResponse { success: true }))
}

// ─── Statistics ──────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsResponse {
    pub stats: RunStats,
    pub display: StatsDisplay,
}

/// Aggregate statistics, recomputed from all stored runs.
async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>> {
    let runs = state.db.runs_sorted_by_date_ascending();
    let stats = RunStats::from_runs(&runs);

    tracing::debug!(
        runs = stats.run_count,
        total_distance_m = stats.total_distance_meters,
        "Computed run stats"
    );

    Ok(Json(StatsResponse {
        display: stats.display(),
        stats,
    }))
}
