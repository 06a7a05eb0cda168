// Apiary - Time window
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Hourly time grid over a trailing window.

use chrono::{Datelike, Duration, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Default window length in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Longest window accepted by the generator configuration (ten years).
pub const MAX_WINDOW_DAYS: u32 = 3660;

/// Closed window `[end - days, end]`, sampled every hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Last timestamp of the window (inclusive).
    pub end: NaiveDateTime,
    /// Window length in days.
    pub days: u32,
}

impl TimeWindow {
    /// Window ending at the current local wall-clock time.
    pub fn ending_now(days: u32) -> Self {
        Self::ending_at(Local::now().naive_local(), days)
    }

    /// Window ending at a fixed time.
    ///
    /// Sub-microsecond precision is dropped so that timestamps render with
    /// at most six fractional digits.
    pub fn ending_at(end: NaiveDateTime, days: u32) -> Self {
        let micros_only = (end.nanosecond() / 1_000) * 1_000;
        let end = end.with_nanosecond(micros_only).unwrap_or(end);
        Self { end, days }
    }

    /// First timestamp of the window, or `None` when it falls before the
    /// earliest representable date.
    pub fn checked_start(&self) -> Option<NaiveDateTime> {
        self.end
            .checked_sub_signed(Duration::days(i64::from(self.days)))
    }

    /// First timestamp of the window.
    ///
    /// Saturates at [`NaiveDateTime::MIN`]; use [`TimeWindow::checked_start`]
    /// to detect that case.
    pub fn start(&self) -> NaiveDateTime {
        self.checked_start().unwrap_or(NaiveDateTime::MIN)
    }

    /// Number of hourly timestamps, both ends included.
    pub fn len(&self) -> usize {
        self.days as usize * 24 + 1
    }

    /// A window always contains at least its end point.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Hourly timestamps in ascending order.
    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> {
        let start = self.start();
        (0..self.len() as i64).map(move |h| start + Duration::hours(h))
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::ending_now(DEFAULT_WINDOW_DAYS)
    }
}

/// Calendar position of a timestamp used by the signal models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourOfYear {
    /// Hour of day (0-23).
    pub hour: u32,
    /// Day of year (1-366).
    pub day_of_year: u32,
}

impl HourOfYear {
    /// Create from explicit values.
    pub fn new(hour: u32, day_of_year: u32) -> Self {
        Self { hour, day_of_year }
    }

    /// Derive from a timestamp.
    pub fn of(timestamp: &NaiveDateTime) -> Self {
        Self {
            hour: timestamp.hour(),
            day_of_year: timestamp.ordinal(),
        }
    }
}
