// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod distance;
pub mod run;
pub mod tracking;

pub use distance::{path_length_meters, polyline_length};
pub use run::finalize_run;
pub use tracking::{TrackingSession, TrackingSnapshot, TrackingState};
