// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Completed run model for storage and API.

use crate::time_utils::{format_run_date, format_stopwatch, format_utc_rfc3339, from_epoch_millis};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stored run record.
///
/// Created once when a run ends and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Store-assigned id (strictly increasing, starting at 1)
    pub id: u64,
    /// Map snapshot (PNG bytes, base64 in JSON)
    #[serde(default, with = "image_base64")]
    pub img: Option<Vec<u8>>,
    /// When the run was saved (epoch millis)
    pub timestamp: i64,
    /// Average speed (km/h, one decimal)
    pub avg_speed_kmh: f32,
    /// Distance in meters
    pub distance_in_meters: u32,
    /// Elapsed running time in milliseconds
    pub time_in_millis: u64,
    /// Estimated calories (kcal)
    pub calories_burned: u32,
}

/// A run that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRun {
    #[serde(default, with = "image_base64")]
    pub img: Option<Vec<u8>>,
    pub timestamp: i64,
    pub avg_speed_kmh: f32,
    pub distance_in_meters: u32,
    pub time_in_millis: u64,
    pub calories_burned: u32,
}

impl NewRun {
    /// Attach the id assigned by the store.
    pub fn into_run(self, id: u64) -> Run {
        Run {
            id,
            img: self.img,
            timestamp: self.timestamp,
            avg_speed_kmh: self.avg_speed_kmh,
            distance_in_meters: self.distance_in_meters,
            time_in_millis: self.time_in_millis,
            calories_burned: self.calories_burned,
        }
    }
}

/// Run list row, with the strings shown in the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub timestamp: i64,
    pub start_date: String,
    pub avg_speed_kmh: f32,
    pub distance_in_meters: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub time_in_millis: u64,
    pub calories_burned: u32,
    pub has_image: bool,
    /// `dd.MM.yy`
    pub date_label: String,
    pub speed_label: String,
    pub distance_label: String,
    pub time_label: String,
    pub calories_label: String,
}

impl From<&Run> for RunSummary {
    fn from(run: &Run) -> Self {
        let date = from_epoch_millis(run.timestamp);
        let time_ms = i64::try_from(run.time_in_millis).unwrap_or(i64::MAX);
        Self {
            id: run.id,
            timestamp: run.timestamp,
            start_date: format_utc_rfc3339(date),
            avg_speed_kmh: run.avg_speed_kmh,
            distance_in_meters: run.distance_in_meters,
            time_in_millis: run.time_in_millis,
            calories_burned: run.calories_burned,
            has_image: run.img.is_some(),
            date_label: format_run_date(date),
            speed_label: format!("{}km/h", format_decimal(run.avg_speed_kmh)),
            distance_label: format!(
                "{}km",
                format_decimal(run.distance_in_meters as f32 / 1000.0)
            ),
            time_label: format_stopwatch(time_ms, false),
            calories_label: format!("{}kcal", run.calories_burned),
        }
    }
}

/// Shortest decimal rendering, always with a fractional part ("3.0", "1.234").
pub fn format_decimal(value: f32) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Optional image bytes carried as standard base64 text.
mod image_base64 {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(img: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match img {
            Some(bytes) => s.serialize_some(&STANDARD.encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|encoded| STANDARD.decode(encoded).map_err(serde::de::Error::custom))
            .transpose()
    }
}
