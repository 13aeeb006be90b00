// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User settings routes.

use crate::error::{AppError, Result};
use crate::models::{UpdateSettingsRequest, UserSettings};
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/settings", get(get_settings).put(update_settings))
}

async fn get_settings(State(state): State<Arc<AppState>>) -> Result<Json<UserSettings>> {
    Ok(Json(state.settings()?.clone()))
}

/// Replace name and weight. Both are required.
async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<UserSettings>> {
    let updated = request
        .into_settings()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    *state.settings()? = updated.clone();

    tracing::info!(weight_kg = updated.weight_kg, "Settings updated");
    Ok(Json(updated))
}
