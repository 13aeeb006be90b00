// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod path;
pub mod run;
pub mod settings;
pub mod stats;

pub use path::{Coordinate, Path, Polyline};
pub use run::{NewRun, Run, RunSummary};
pub use settings::{UpdateSettingsRequest, UserSettings};
pub use stats::{ChartPoint, RunStats, StatsDisplay};
