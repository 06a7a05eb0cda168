// Apiary - Reading records
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! One row of the generated dataset.
//!
//! Field order is the column order of both the JSON and CSV exports.

use crate::patterns::round_to;
use crate::sensors::HiveConditions;
use crate::topology::{Hive, HiveKind};
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A single hourly reading for one hive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// ISO-8601 local timestamp.
    #[serde(with = "iso_timestamp")]
    pub timestamp: NaiveDateTime,
    pub hive_id: String,
    pub hive_name: String,
    pub hive_type: HiveKind,
    pub location: String,
    pub master_id: Option<String>,
    /// °C, 1 decimal.
    pub temperature: f64,
    /// %, 1 decimal.
    pub humidity: f64,
    /// kg, 1 decimal.
    pub weight: f64,
    /// Whole percent.
    pub activity_level: u8,
    /// kg, 4 decimals.
    pub hourly_production: f64,
    /// kg, 3 decimals.
    pub cumulative_production: f64,
    /// kg per unit activity, 4 decimals.
    pub production_efficiency: f64,
}

/// Unrounded production values for one hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionSample {
    pub hourly: f64,
    pub cumulative: f64,
    pub efficiency: f64,
}

impl Reading {
    /// Build a reading, copying the hive attributes and rounding every
    /// measured value to its output precision.
    pub fn new(
        timestamp: NaiveDateTime,
        hive: &Hive,
        conditions: &HiveConditions,
        production: ProductionSample,
    ) -> Self {
        Self {
            timestamp,
            hive_id: hive.id.clone(),
            hive_name: hive.name.clone(),
            hive_type: hive.kind,
            location: hive.location.clone(),
            master_id: hive.master_id.clone(),
            temperature: round_to(conditions.temperature, 1),
            humidity: round_to(conditions.humidity, 1),
            weight: round_to(conditions.weight, 1),
            activity_level: conditions.activity_level,
            hourly_production: round_to(production.hourly, 4),
            cumulative_production: round_to(production.cumulative, 3),
            production_efficiency: round_to(production.efficiency, 4),
        }
    }

    /// Hour of day of the reading.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }
}

/// ISO-8601 rendering without a zone suffix, fractional seconds only when
/// present.
pub mod iso_timestamp {
    use chrono::{NaiveDateTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    const WHOLE_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
    const MICROSECONDS: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    /// Format a timestamp.
    pub fn format(timestamp: &NaiveDateTime) -> String {
        let pattern = if timestamp.nanosecond() == 0 {
            WHOLE_SECONDS
        } else {
            MICROSECONDS
        };
        timestamp.format(pattern).to_string()
    }

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(timestamp))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<NaiveDateTime>().map_err(serde::de::Error::custom)
    }
}
