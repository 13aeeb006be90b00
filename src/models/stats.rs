// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Aggregate statistics over completed runs.
//!
//! Nothing here is stored: the summary is recomputed from the run store on
//! every dashboard request.

use crate::models::run::format_decimal;
use crate::models::Run;
use crate::time_utils::format_stopwatch;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Totals across all runs plus the speed-over-time chart series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunStats {
    pub run_count: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_time_millis: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_distance_meters: u64,
    /// Mean of the per-run average speeds (km/h)
    pub avg_speed_kmh: f32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_calories_burned: u64,
    /// One point per run, oldest first
    pub speed_series: Vec<ChartPoint>,
}

/// A bar in the "Avg Speed Over Time" chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChartPoint {
    /// Position on the x axis (0 = oldest run)
    pub index: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub run_id: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub timestamp: i64,
    pub avg_speed_kmh: f32,
}

impl RunStats {
    /// Aggregate a collection of runs in any order.
    ///
    /// Sums do not depend on input order; the chart series is sorted by
    /// timestamp (ties broken by id). Empty input gives all zeros.
    pub fn from_runs(runs: &[Run]) -> Self {
        if runs.is_empty() {
            return Self::default();
        }

        let mut total_time_millis = 0u64;
        let mut total_distance_meters = 0u64;
        let mut total_calories_burned = 0u64;
        let mut speed_sum = 0.0f64;

        for run in runs {
            total_time_millis = total_time_millis.saturating_add(run.time_in_millis);
            total_distance_meters += u64::from(run.distance_in_meters);
            total_calories_burned += u64::from(run.calories_burned);
            speed_sum += f64::from(run.avg_speed_kmh);
        }

        let mut chronological: Vec<&Run> = runs.iter().collect();
        chronological.sort_by_key(|r| (r.timestamp, r.id));

        let speed_series = chronological
            .into_iter()
            .enumerate()
            .map(|(i, r)| ChartPoint {
                index: u32::try_from(i).unwrap_or(u32::MAX),
                run_id: r.id,
                timestamp: r.timestamp,
                avg_speed_kmh: r.avg_speed_kmh,
            })
            .collect();

        Self {
            run_count: u32::try_from(runs.len()).unwrap_or(u32::MAX),
            total_time_millis,
            total_distance_meters,
            avg_speed_kmh: (speed_sum / runs.len() as f64) as f32,
            total_calories_burned,
            speed_series,
        }
    }

    /// Strings for the statistics tiles.
    pub fn display(&self) -> StatsDisplay {
        let km = self.total_distance_meters as f64 / 1000.0;
        let time_ms = i64::try_from(self.total_time_millis).unwrap_or(i64::MAX);
        StatsDisplay {
            total_time: format_stopwatch(time_ms, false),
            total_distance: format!("{}km", format_decimal(round_tenth(km) as f32)),
            avg_speed: format!(
                "{}km/h",
                format_decimal(round_tenth(f64::from(self.avg_speed_kmh)) as f32)
            ),
            total_calories: format!("{}kcal", self.total_calories_burned),
        }
    }
}

/// Formatted statistics tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsDisplay {
    pub total_time: String,
    pub total_distance: String,
    pub avg_speed: String,
    pub total_calories: String,
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
