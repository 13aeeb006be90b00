// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{Request, Response},
};
use run_tracker::config::Config;
use run_tracker::db::RunDb;
use run_tracker::models::NewRun;
use run_tracker::routes::create_router;
use run_tracker::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app with an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_db(RunDb::in_memory())
}

#[allow(dead_code)]
pub fn create_test_app_with_db(db: RunDb) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::default(), db));
    (create_router(state.clone()), state)
}

/// Build a run record directly (bypassing tracking).
#[allow(dead_code)]
pub fn new_run(timestamp: i64, distance: u32, time: u64, speed: f32, kcal: u32) -> NewRun {
    NewRun {
        img: None,
        timestamp,
        avg_speed_kmh: speed,
        distance_in_meters: distance,
        time_in_millis: time,
        calories_burned: kcal,
    }
}

/// Send a request with an optional JSON body.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
