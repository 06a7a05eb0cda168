// Apiary - Core generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Core dataset generation logic.
//!
//! Readings are produced timestamp-major, hive-minor: every hive of the
//! topology (in declaration order) for the first hour, then every hive for
//! the next hour, and so on. Consumers may rely on this ordering.

use crate::dataset::{Dataset, DatasetMetadata};
use crate::error::{ApiaryError, Result};
use crate::production::{production_efficiency, ProductionLedger, ProductionModel};
use crate::reading::{ProductionSample, Reading};
use crate::sensors::SensorModel;
use crate::topology::Topology;
use crate::window::{HourOfYear, TimeWindow, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use chrono::{Duration, NaiveDateTime};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Window length in days.
    pub days: u32,
    /// Fixed window end; the current local time when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            days: DEFAULT_WINDOW_DAYS,
            end: None,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set window length in days.
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Pin the window end.
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations that cannot describe a window.
    pub fn validate(&self) -> Result<()> {
        if self.days == 0 {
            return Err(ApiaryError::InvalidConfig(
                "window must span at least one day".to_string(),
            ));
        }
        if self.days > MAX_WINDOW_DAYS {
            return Err(ApiaryError::InvalidConfig(format!(
                "window of {} days exceeds the {} day limit",
                self.days, MAX_WINDOW_DAYS
            )));
        }
        if let Some(end) = self.end {
            if TimeWindow::ending_at(end, self.days).checked_start().is_none() {
                return Err(ApiaryError::InvalidConfig(format!(
                    "window of {} days ending {} starts before the earliest supported date",
                    self.days, end
                )));
            }
        }
        Ok(())
    }

    /// Resolve the time window, reading the clock if no end is pinned.
    pub fn window(&self) -> TimeWindow {
        match self.end {
            Some(end) => TimeWindow::ending_at(end, self.days),
            None => TimeWindow::ending_now(self.days),
        }
    }

    /// Random source for this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        }
    }
}

/// Lazy reading generator for one run.
///
/// Owns the production ledger for the duration of the run; the final
/// totals are available through [`HiveDataGenerator::into_ledger`].
pub struct HiveDataGenerator<'a, R: Rng> {
    topology: &'a Topology,
    start: NaiveDateTime,
    num_timestamps: usize,
    sensors: SensorModel,
    production: ProductionModel,
    ledger: ProductionLedger,
    rng: R,
    hour_idx: usize,
    hive_idx: usize,
}

impl<'a> HiveDataGenerator<'a, StdRng> {
    /// Generator using the random source described by `config`.
    pub fn from_config(config: &GeneratorConfig, topology: &'a Topology) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_rng(topology, config.window(), config.rng()))
    }
}

impl<'a, R: Rng> HiveDataGenerator<'a, R> {
    /// Generator over `window` drawing from `rng`.
    pub fn with_rng(topology: &'a Topology, window: TimeWindow, rng: R) -> Self {
        Self {
            topology,
            start: window.start(),
            num_timestamps: window.len(),
            sensors: SensorModel::default(),
            production: ProductionModel::default(),
            ledger: ProductionLedger::for_topology(topology),
            rng,
            hour_idx: 0,
            hive_idx: 0,
        }
    }

    /// Replace the sensor model.
    pub fn with_sensor_model(mut self, sensors: SensorModel) -> Self {
        self.sensors = sensors;
        self
    }

    /// Replace the production model.
    pub fn with_production_model(mut self, production: ProductionModel) -> Self {
        self.production = production;
        self
    }

    /// Running totals so far.
    pub fn ledger(&self) -> &ProductionLedger {
        &self.ledger
    }

    /// Consume the generator, returning its ledger.
    pub fn into_ledger(self) -> ProductionLedger {
        self.ledger
    }

    fn remaining(&self) -> usize {
        let hives = self.topology.len();
        if hives == 0 || self.hour_idx >= self.num_timestamps {
            return 0;
        }
        (self.num_timestamps - self.hour_idx) * hives - self.hive_idx
    }
}

impl<'a, R: Rng> Iterator for HiveDataGenerator<'a, R> {
    type Item = Reading;

    fn next(&mut self) -> Option<Reading> {
        if self.remaining() == 0 {
            return None;
        }

        let topology = self.topology;
        let hives = topology.hives();
        let hive = &hives[self.hive_idx];
        let timestamp = self.start + Duration::hours(self.hour_idx as i64);
        let at = HourOfYear::of(&timestamp);

        let conditions = self.sensors.sample(hive.kind, at, &mut self.rng);
        let hourly = self
            .production
            .hourly_production(hive.kind, at, &conditions, &mut self.rng);
        let cumulative = self.ledger.record(&hive.id, hourly);
        let efficiency = production_efficiency(hourly, conditions.activity_level);

        let reading = Reading::new(
            timestamp,
            hive,
            &conditions,
            ProductionSample {
                hourly,
                cumulative,
                efficiency,
            },
        );

        self.hive_idx += 1;
        if self.hive_idx == hives.len() {
            self.hive_idx = 0;
            self.hour_idx += 1;
        }

        Some(reading)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<'a, R: Rng> ExactSizeIterator for HiveDataGenerator<'a, R> {}

/// Generate the full dataset for a topology.
pub fn generate_dataset(config: &GeneratorConfig, topology: &Topology) -> Result<Dataset> {
    config.validate()?;
    let window = config.window();

    #[cfg(feature = "logging")]
    log::debug!(
        "Generating {} hourly timestamps for {} hives ({} to {})",
        window.len(),
        topology.len(),
        window.start(),
        window.end
    );

    let mut generator = HiveDataGenerator::with_rng(topology, window, config.rng());
    let readings: Vec<Reading> = generator.by_ref().collect();
    let ledger = generator.into_ledger();

    #[cfg(feature = "logging")]
    log::debug!(
        "Generated {} readings, fleet production {:.3} kg",
        readings.len(),
        ledger.fleet_total()
    );

    let metadata = DatasetMetadata {
        seed: config.seed,
        window_start: window.start(),
        window_end: window.end,
        hive_count: topology.len(),
        total_production_kg: ledger.fleet_total(),
    };

    Ok(Dataset::new(readings, metadata))
}
