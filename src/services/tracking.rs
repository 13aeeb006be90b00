// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live tracking session.
//!
//! Holds the path and running time of the run in progress. Callers pass the
//! current time into every operation so the session never reads the clock.

use crate::error::{AppError, Result};
use crate::models::path::encode_polyline;
use crate::models::{Coordinate, NewRun, Path};
use crate::services::run::finalize_run;
use crate::time_utils::format_stopwatch;
use chrono::{DateTime, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum TrackingState {
    #[default]
    Idle,
    Tracking,
    Paused,
}

/// The run in progress.
#[derive(Debug, Default)]
pub struct TrackingSession {
    state: TrackingState,
    path: Path,
    /// Time from completed laps
    accumulated_millis: u64,
    /// Start of the running lap (set only while tracking)
    lap_started_at: Option<DateTime<Utc>>,
    /// A finished run is being written to the store
    saving: bool,
}

/// Current session as reported to clients.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrackingSnapshot {
    pub state: TrackingState,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub elapsed_millis: u64,
    /// `HH:MM:SS:T`
    pub timer: String,
    pub polylines: Vec<Vec<Coordinate>>,
    /// Each polyline in Google polyline format (precision 5)
    pub encoded_polylines: Vec<String>,
}

impl TrackingSession {
    pub fn state(&self) -> TrackingState {
        self.state
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start a new run, or resume a paused one. Either way a new polyline begins.
    pub fn start_or_resume(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.ensure_not_saving()?;
        match self.state {
            TrackingState::Tracking => {
                return Err(AppError::Conflict("Run is already being tracked".to_string()))
            }
            TrackingState::Idle => {
                self.path.clear();
                self.accumulated_millis = 0;
                tracing::info!("Tracking started");
            }
            TrackingState::Paused => {
                tracing::info!(
                    elapsed_ms = self.accumulated_millis,
                    "Tracking resumed"
                );
            }
        }

        self.path.push(Vec::new());
        self.lap_started_at = Some(now);
        self.state = TrackingState::Tracking;
        Ok(())
    }

    /// Pause tracking. The current polyline ends here.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.ensure_not_saving()?;
        if self.state != TrackingState::Tracking {
            return Err(AppError::Conflict("Run is not being tracked".to_string()));
        }

        self.accumulated_millis = self.elapsed_millis(now);
        self.lap_started_at = None;
        self.state = TrackingState::Paused;

        tracing::info!(elapsed_ms = self.accumulated_millis, "Tracking paused");
        Ok(())
    }

    /// Append a location fix to the current polyline.
    pub fn add_location(&mut self, coordinate: Coordinate) -> Result<()> {
        if !coordinate.is_valid() {
            return Err(AppError::BadRequest(format!(
                "Coordinate out of range: lat={}, lon={}",
                coordinate.lat, coordinate.lon
            )));
        }
        self.ensure_not_saving()?;
        if self.state != TrackingState::Tracking {
            return Err(AppError::Conflict(
                "Location fixes are only accepted while tracking".to_string(),
            ));
        }

        match self.path.last_mut() {
            Some(line) => line.push(coordinate),
            None => self.path.push(vec![coordinate]),
        }
        Ok(())
    }

    /// Running time: completed laps plus the lap in progress.
    pub fn elapsed_millis(&self, now: DateTime<Utc>) -> u64 {
        let lap = self
            .lap_started_at
            .map(|start| now.signed_duration_since(start).num_milliseconds().max(0) as u64)
            .unwrap_or(0);
        self.accumulated_millis.saturating_add(lap)
    }

    /// End the run and build its record. The session returns to idle.
    pub fn finish(
        &mut self,
        now: DateTime<Utc>,
        weight_kg: f32,
        img: Option<Vec<u8>>,
    ) -> Result<NewRun> {
        let run = self.begin_finish(now, weight_kg, img)?;
        self.complete_finish();
        Ok(run)
    }

    /// Stop the clock and build the run record, keeping the path until the
    /// record is stored.
    ///
    /// The session stays paused and refuses further changes until
    /// [`complete_finish`](Self::complete_finish) or
    /// [`abort_finish`](Self::abort_finish) is called.
    pub fn begin_finish(
        &mut self,
        now: DateTime<Utc>,
        weight_kg: f32,
        img: Option<Vec<u8>>,
    ) -> Result<NewRun> {
        self.ensure_not_saving()?;
        if self.state == TrackingState::Idle {
            return Err(AppError::Conflict("No run in progress".to_string()));
        }

        let time_in_millis = self.elapsed_millis(now);
        if time_in_millis == 0 {
            return Err(AppError::Conflict(
                "Run has no recorded time yet".to_string(),
            ));
        }

        if self.state == TrackingState::Tracking {
            self.accumulated_millis = time_in_millis;
            self.lap_started_at = None;
            self.state = TrackingState::Paused;
        }
        self.saving = true;

        let run = finalize_run(
            &self.path,
            time_in_millis,
            weight_kg,
            img,
            now.timestamp_millis(),
        );

        tracing::info!(
            distance_m = run.distance_in_meters,
            time_ms = run.time_in_millis,
            avg_speed_kmh = run.avg_speed_kmh,
            "Tracking finished"
        );

        Ok(run)
    }

    /// The finished run was stored; return to idle.
    pub fn complete_finish(&mut self) {
        self.reset();
    }

    /// The finished run could not be stored. The session stays paused with
    /// its path and time so the user can finish again.
    pub fn abort_finish(&mut self) {
        if self.saving {
            tracing::warn!(
                elapsed_ms = self.accumulated_millis,
                "Finish aborted, run kept paused"
            );
        }
        self.saving = false;
    }

    /// Discard the run in progress.
    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_not_saving()?;
        if self.state != TrackingState::Idle {
            tracing::info!("Tracking cancelled");
        }
        self.reset();
        Ok(())
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> Result<TrackingSnapshot> {
        let elapsed_millis = self.elapsed_millis(now);
        let encoded_polylines = self
            .path
            .iter()
            .map(|line| encode_polyline(line))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Polyline error: {}", e)))?;

        Ok(TrackingSnapshot {
            state: self.state,
            elapsed_millis,
            timer: format_stopwatch(i64::try_from(elapsed_millis).unwrap_or(i64::MAX), true),
            polylines: self.path.clone(),
            encoded_polylines,
        })
    }

    fn ensure_not_saving(&self) -> Result<()> {
        if self.saving {
            return Err(AppError::Conflict("Finished run is being saved".to_string()));
        }
        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
