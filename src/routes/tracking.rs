// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live tracking routes.
//!
//! The client owns the location provider and forwards fixes here; the server
//! keeps the path and the clock and saves the run when it is finished.

use crate::error::{AppError, Result};
use crate::models::{Coordinate, Run};
use crate::services::TrackingSnapshot;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tracking", get(get_tracking))
        .route("/api/tracking/start", post(start_tracking))
        .route("/api/tracking/pause", post(pause_tracking))
        .route("/api/tracking/location", post(add_location))
        .route("/api/tracking/finish", post(finish_tracking))
        .route("/api/tracking/cancel", post(cancel_tracking))
}

async fn get_tracking(State(state): State<Arc<AppState>>) -> Result<Json<TrackingSnapshot>> {
    let session = state.tracking()?;
    Ok(Json(session.snapshot(Utc::now())?))
}

/// Start a run, or resume a paused one.
async fn start_tracking(State(state): State<Arc<AppState>>) -> Result<Json<TrackingSnapshot>> {
    let now = Utc::now();
    let mut session = state.tracking()?;
    session.start_or_resume(now)?;
    Ok(Json(session.snapshot(now)?))
}

async fn pause_tracking(State(state): State<Arc<AppState>>) -> Result<Json<TrackingSnapshot>> {
    let now = Utc::now();
    let mut session = state.tracking()?;
    session.pause(now)?;
    Ok(Json(session.snapshot(now)?))
}

async fn add_location(
    State(state): State<Arc<AppState>>,
    Json(fix): Json<Coordinate>,
) -> Result<Json<TrackingSnapshot>> {
    let now = Utc::now();
    let mut session = state.tracking()?;
    session.add_location(fix)?;
    Ok(Json(session.snapshot(now)?))
}

async fn cancel_tracking(State(state): State<Arc<AppState>>) -> Result<Json<TrackingSnapshot>> {
    let now = Utc::now();
    let mut session = state.tracking()?;
    session.cancel()?;
    Ok(Json(session.snapshot(now)?))
}

/// Optional finish payload.
#[derive(Deserialize, Default)]
struct FinishRequest {
    /// Map snapshot, standard base64
    #[serde(default)]
    image: Option<String>,
}

/// End the run and save it.
async fn finish_tracking(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Run>)> {
    let request: FinishRequest = if body.is_empty() {
        FinishRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid finish payload: {}", e)))?
    };

    let img = request
        .image
        .map(|encoded| STANDARD.decode(encoded))
        .transpose()
        .map_err(|_| AppError::BadRequest("Image must be standard base64".to_string()))?;

    let weight_kg = state.settings()?.weight_kg;

    // Guard is released before the store write; the session keeps its path
    // until the run is stored.
    let new_run = state.tracking()?.begin_finish(Utc::now(), weight_kg, img)?;

    let run = match state.db.insert_run(new_run).await {
        Ok(run) => {
            state.tracking()?.complete_finish();
            run
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save finished run");
            state.tracking()?.abort_finish();
            return Err(e);
        }
    };

    tracing::info!(
        run_id = run.id,
        distance_m = run.distance_in_meters,
        "Run saved successfully"
    );

    Ok((StatusCode::CREATED, Json(run)))
}
