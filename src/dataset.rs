// Apiary - Dataset structures
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Dataset structures and I/O operations.
//!
//! The JSON export is a bare array of readings; metadata stays in memory and
//! is re-derived when a file is loaded back.

use crate::reading::Reading;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{ApiaryError, Result};

/// Generation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Generation seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// First timestamp.
    pub window_start: NaiveDateTime,
    /// Last timestamp.
    pub window_end: NaiveDateTime,
    /// Number of distinct hives.
    pub hive_count: usize,
    /// Production of the whole fleet over the window, in kg.
    pub total_production_kg: f64,
}

/// Generated readings plus metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    readings: Vec<Reading>,
    pub metadata: DatasetMetadata,
}

impl Dataset {
    /// Create a dataset from readings and their metadata.
    pub fn new(readings: Vec<Reading>, metadata: DatasetMetadata) -> Self {
        Self { readings, metadata }
    }

    /// Create a dataset from readings alone, deriving metadata.
    ///
    /// Returns `None` when `readings` is empty.
    pub fn from_readings(readings: Vec<Reading>) -> Option<Self> {
        let window_start = readings.iter().map(|r| r.timestamp).min()?;
        let window_end = readings.iter().map(|r| r.timestamp).max()?;
        let hive_count = readings
            .iter()
            .map(|r| r.hive_id.as_str())
            .collect::<HashSet<&str>>()
            .len();

        let mut dataset = Self {
            metadata: DatasetMetadata {
                seed: None,
                window_start,
                window_end,
                hive_count,
                total_production_kg: 0.0,
            },
            readings,
        };
        dataset.metadata.total_production_kg =
            dataset.summary().iter().map(|s| s.total_production).sum();
        Some(dataset)
    }

    /// All readings, timestamp-major and hive-minor.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Consume the dataset, returning its readings.
    pub fn into_readings(self) -> Vec<Reading> {
        self.readings
    }

    /// Get number of readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Readings of one hive, in time order.
    pub fn for_hive<'a>(&'a self, hive_id: &'a str) -> impl Iterator<Item = &'a Reading> {
        self.readings.iter().filter(move |r| r.hive_id == hive_id)
    }

    /// Distinct timestamps, ascending.
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        let mut stamps: Vec<NaiveDateTime> = self.readings.iter().map(|r| r.timestamp).collect();
        stamps.sort_unstable();
        stamps.dedup();
        stamps
    }

    /// Per-hive statistics, hives in first-seen order.
    pub fn summary(&self) -> Vec<HiveSummary> {
        let mut order: Vec<&str> = Vec::new();
        for r in &self.readings {
            if !order.contains(&r.hive_id.as_str()) {
                order.push(&r.hive_id);
            }
        }

        order
            .into_iter()
            .filter_map(|id| HiveSummary::from_readings(id, self.for_hive(id)))
            .collect()
    }

    /// Export readings to a pretty JSON array, replacing any existing file.
    pub fn to_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.readings)?;
        writer.flush()?;

        #[cfg(feature = "logging")]
        log::info!(
            "Wrote {} readings to {}",
            self.readings.len(),
            path.as_ref().display()
        );

        Ok(())
    }

    /// Import a dataset from a JSON array of readings.
    ///
    /// Metadata is re-derived from the rows; an empty array is an error.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let readings: Vec<Reading> = serde_json::from_reader(reader)?;
        Self::from_readings(readings)
            .ok_or_else(|| ApiaryError::EmptyDataset(path.display().to_string()))
    }

    /// Export readings to CSV with a header row.
    pub fn to_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = csv::Writer::from_path(path.as_ref())?;
        for reading in &self.readings {
            writer.serialize(reading)?;
        }
        writer.flush()?;

        #[cfg(feature = "logging")]
        log::info!(
            "Wrote {} CSV rows to {}",
            self.readings.len(),
            path.as_ref().display()
        );

        Ok(())
    }

    /// Import a dataset from CSV written by [`Dataset::to_csv`].
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)?;
        let mut readings = Vec::new();
        for record in reader.deserialize() {
            readings.push(record?);
        }
        Self::from_readings(readings)
            .ok_or_else(|| ApiaryError::EmptyDataset(path.display().to_string()))
    }
}

/// Statistics for one hive over the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiveSummary {
    pub hive_id: String,
    pub readings: usize,
    /// Final cumulative production, kg.
    pub total_production: f64,
    pub mean_temperature: f64,
    pub mean_humidity: f64,
    pub mean_activity: f64,
    pub min_weight: f64,
    pub max_weight: f64,
}

impl HiveSummary {
    fn from_readings<'a>(
        hive_id: &str,
        readings: impl Iterator<Item = &'a Reading>,
    ) -> Option<Self> {
        let mut count = 0usize;
        let mut temperature = 0.0;
        let mut humidity = 0.0;
        let mut activity = 0.0;
        let mut min_weight = f64::INFINITY;
        let mut max_weight = f64::NEG_INFINITY;
        let mut total_production = 0.0;

        for r in readings {
            count += 1;
            temperature += r.temperature;
            humidity += r.humidity;
            activity += f64::from(r.activity_level);
            min_weight = min_weight.min(r.weight);
            max_weight = max_weight.max(r.weight);
            total_production = r.cumulative_production;
        }

        if count == 0 {
            return None;
        }

        let n = count as f64;
        Some(Self {
            hive_id: hive_id.to_string(),
            readings: count,
            total_production,
            mean_temperature: temperature / n,
            mean_humidity: humidity / n,
            mean_activity: activity / n,
            min_weight,
            max_weight,
        })
    }
}
