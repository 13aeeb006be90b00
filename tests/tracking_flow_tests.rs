// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end tracking: start, stream fixes, pause, resume, finish.

use axum::http::StatusCode;
use run_tracker::db::RunDb;
use serde_json::json;
use std::time::Duration;

mod common;
use common::{json_body, send};

/// Give the wall clock time to advance so finished runs have a duration.
async fn let_time_pass() {
    tokio::time::sleep(Duration::from_millis(25)).await;
}

#[tokio::test]
async fn test_idle_snapshot() {
    let (app, _state) = common::create_test_app();

    let body = json_body(send(&app, "GET", "/api/tracking", None).await).await;
    assert_eq!(body["state"], "idle");
    assert_eq!(body["elapsed_millis"], 0);
    assert_eq!(body["timer"], "00:00:00:0");
    assert_eq!(body["polylines"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_full_run_is_saved() {
    let (app, state) = common::create_test_app();

    let response = send(&app, "POST", "/api/tracking/start", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["state"], "tracking");

    for (lat, lon) in [(0.0, 0.0), (0.0, 0.01)] {
        let response = send(
            &app,
            "POST",
            "/api/tracking/location",
            Some(json!({ "lat": lat, "lon": lon })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let_time_pass().await;
    let response = send(&app, "POST", "/api/tracking/pause", None).await;
    let body = json_body(response).await;
    assert_eq!(body["state"], "paused");

    // Fixes while paused are refused.
    let response = send(
        &app,
        "POST",
        "/api/tracking/location",
        Some(json!({ "lat": 5.0, "lon": 5.0 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Resume opens a second polyline; the jump across the pause is not counted.
    send(&app, "POST", "/api/tracking/start", None).await;
    for (lat, lon) in [(10.0, 10.0), (10.0, 10.01)] {
        send(
            &app,
            "POST",
            "/api/tracking/location",
            Some(json!({ "lat": lat, "lon": lon })),
        )
        .await;
    }

    let body = json_body(send(&app, "GET", "/api/tracking", None).await).await;
    assert_eq!(body["polylines"].as_array().unwrap().len(), 2);
    assert_eq!(body["encoded_polylines"].as_array().unwrap().len(), 2);

    let_time_pass().await;
    let response = send(
        &app,
        "POST",
        "/api/tracking/finish",
        Some(json!({ "image": "iVBORw==" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let run = json_body(response).await;
    assert_eq!(run["id"], 1);
    assert_eq!(run["img"], "iVBORw==");
    // ~1111.9 m per polyline, truncated separately; 10°N shrinks longitude degrees.
    let distance = run["distance_in_meters"].as_u64().unwrap();
    assert!((2200..=2225).contains(&distance), "distance {distance}");
    assert!(run["time_in_millis"].as_u64().unwrap() >= 50);
    assert_eq!(
        run["calories_burned"].as_u64().unwrap(),
        (distance as f64 / 1000.0 * 80.0) as u64
    );

    // Session is idle again and the run is stored.
    let body = json_body(send(&app, "GET", "/api/tracking", None).await).await;
    assert_eq!(body["state"], "idle");
    assert_eq!(state.db.count(), 1);

    let stats = json_body(send(&app, "GET", "/api/stats", None).await).await;
    assert_eq!(stats["stats"]["run_count"], 1);
    assert_eq!(stats["stats"]["total_distance_meters"], distance);
}

#[tokio::test]
async fn test_finish_without_body() {
    let (app, state) = common::create_test_app();
    send(&app, "POST", "/api/tracking/start", None).await;
    let_time_pass().await;

    let response = send(&app, "POST", "/api/tracking/finish", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let run = json_body(response).await;
    assert_eq!(run["distance_in_meters"], 0);
    assert_eq!(run["avg_speed_kmh"], 0.0);
    assert!(run["img"].is_null());
    assert_eq!(state.db.count(), 1);
}

#[tokio::test]
async fn test_failed_save_keeps_run_for_retry() {
    let dir = tempfile::tempdir().unwrap();
    // Parent directory does not exist yet, so the first save fails.
    let runs_dir = dir.path().join("missing");
    let db = RunDb::open(runs_dir.join("runs.json")).await.unwrap();
    let (app, state) = common::create_test_app_with_db(db);

    send(&app, "POST", "/api/tracking/start", None).await;
    for (lat, lon) in [(0.0, 0.0), (0.0, 0.01)] {
        send(
            &app,
            "POST",
            "/api/tracking/location",
            Some(json!({ "lat": lat, "lon": lon })),
        )
        .await;
    }
    let_time_pass().await;

    let response = send(&app, "POST", "/api/tracking/finish", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(state.db.count(), 0);

    let body = json_body(send(&app, "GET", "/api/tracking", None).await).await;
    assert_eq!(body["state"], "paused");
    let polylines = body["polylines"].as_array().unwrap();
    assert_eq!(polylines.len(), 1);
    assert_eq!(polylines[0].as_array().unwrap().len(), 2);
    let elapsed = body["elapsed_millis"].as_u64().unwrap();
    assert!(elapsed > 0);

    std::fs::create_dir(&runs_dir).unwrap();
    let response = send(&app, "POST", "/api/tracking/finish", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let run = json_body(response).await;
    assert_eq!(run["time_in_millis"], elapsed);
    assert!(run["distance_in_meters"].as_u64().unwrap() > 1000);
    assert_eq!(state.db.count(), 1);

    let body = json_body(send(&app, "GET", "/api/tracking", None).await).await;
    assert_eq!(body["state"], "idle");
}

#[tokio::test]
async fn test_illegal_transitions_conflict() {
    let (app, _state) = common::create_test_app();

    assert_eq!(
        send(&app, "POST", "/api/tracking/pause", None).await.status(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        send(&app, "POST", "/api/tracking/finish", None).await.status(),
        StatusCode::CONFLICT
    );

    send(&app, "POST", "/api/tracking/start", None).await;
    let response = send(&app, "POST", "/api/tracking/start", None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(response).await["error"], "conflict");
}

#[tokio::test]
async fn test_out_of_range_location_is_bad_request() {
    let (app, _state) = common::create_test_app();
    send(&app, "POST", "/api/tracking/start", None).await;

    let response = send(
        &app,
        "POST",
        "/api/tracking/location",
        Some(json!({ "lat": 123.0, "lon": 0.0 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_image_is_bad_request() {
    let (app, state) = common::create_test_app();
    send(&app, "POST", "/api/tracking/start", None).await;
    let_time_pass().await;

    let response = send(
        &app,
        "POST",
        "/api/tracking/finish",
        Some(json!({ "image": "not base64!" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The run is still in progress.
    assert_eq!(state.db.count(), 0);
    let body = json_body(send(&app, "GET", "/api/tracking", None).await).await;
    assert_eq!(body["state"], "tracking");
}

#[tokio::test]
async fn test_cancel_discards_run() {
    let (app, state) = common::create_test_app();
    send(&app, "POST", "/api/tracking/start", None).await;
    send(
        &app,
        "POST",
        "/api/tracking/location",
        Some(json!({ "lat": 1.0, "lon": 1.0 })),
    )
    .await;

    let response = send(&app, "POST", "/api/tracking/cancel", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["state"], "idle");
    assert_eq!(body["polylines"].as_array().unwrap().len(), 0);
    assert_eq!(state.db.count(), 0);
}
