// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Turning a finished tracking session into a run record.

use crate::models::{NewRun, Path};
use crate::services::distance::path_length_meters;

/// Build the run record for a finished session.
///
/// Average speed is rounded to one decimal and is zero for a zero-length
/// session. Calories are `km * weight_kg`, truncated.
pub fn finalize_run(
    path: &Path,
    time_in_millis: u64,
    weight_kg: f32,
    img: Option<Vec<u8>>,
    timestamp: i64,
) -> NewRun {
    let distance_in_meters = path_length_meters(path);
    let km = f64::from(distance_in_meters) / 1000.0;

    NewRun {
        img,
        timestamp,
        avg_speed_kmh: avg_speed_kmh(distance_in_meters, time_in_millis),
        distance_in_meters,
        time_in_millis,
        calories_burned: (km * f64::from(weight_kg.max(0.0))) as u32,
    }
}

/// km/h rounded to one decimal, ties to even.
pub fn avg_speed_kmh(distance_in_meters: u32, time_in_millis: u64) -> f32 {
    if time_in_millis == 0 {
        return 0.0;
    }
    let km = f64::from(distance_in_meters) / 1000.0;
    let hours = time_in_millis as f64 / 3_600_000.0;
    ((km / hours * 10.0).round_ties_even() / 10.0) as f32
}
