// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a duration as a stopwatch string.
///
/// Produces `HH:MM:SS`, or `HH:MM:SS:T` with tenths of a second when
/// `include_tenths` is set. Negative durations format as zero. Hours are not
/// wrapped at a day and simply widen past two digits.
pub fn format_stopwatch(millis: i64, include_tenths: bool) -> String {
    let millis = millis.max(0);
    let hours = millis / 3_600_000;
    let minutes = (millis / 60_000) % 60;
    let seconds = (millis / 1_000) % 60;

    if include_tenths {
        let tenths = (millis % 1_000) / 100;
        format!("{hours:02}:{minutes:02}:{seconds:02}:{tenths}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Convert epoch milliseconds to a UTC timestamp.
///
/// Out-of-range values clamp to the Unix epoch.
pub fn from_epoch_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Short run-list date (`dd.MM.yy`).
pub fn format_run_date(date: DateTime<Utc>) -> String {
    date.format("%d.%m.%y").to_string()
}
