// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Path length along recorded polylines.

use crate::models::{Coordinate, Path};
use geo::{Distance, Haversine};

/// Length of one polyline in meters (haversine, mean earth radius).
///
/// Fewer than two points has no length.
pub fn polyline_length(line: &[Coordinate]) -> f64 {
    line.windows(2)
        .map(|pair| Haversine.distance(pair[0].to_point(), pair[1].to_point()))
        .sum()
}

/// Total distance of a path in whole meters.
///
/// Each polyline is truncated to whole meters before summing. The gap between
/// the end of one polyline and the start of the next (a pause) is not counted.
pub fn path_length_meters(path: &Path) -> u32 {
    path.iter()
        .map(|line| polyline_length(line) as u32)
        .fold(0u32, u32::saturating_add)
}
