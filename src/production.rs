// Apiary - Honey production accounting
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Honey production model and per-hive cumulative ledger.
//!
//! Production only happens inside [`PRODUCTION_HOURS`]. Within that window
//! the hourly yield is a base rate scaled by condition factors, a seasonal
//! factor and a uniform random multiplier.

use crate::patterns::{HourWindow, Sinusoid, YEAR_DAYS};
use crate::sensors::HiveConditions;
use crate::topology::{HiveKind, Topology};
use crate::window::HourOfYear;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Hours during which nectar is converted to honey.
///
/// Two hours wider than the foraging window used for activity.
pub const PRODUCTION_HOURS: HourWindow = HourWindow::new(6, 20);

/// Multiplicative factors applied to the base rate for one hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductionFactors {
    pub production_multiplier: f64,
    pub temp_factor: f64,
    pub humidity_factor: f64,
    pub activity_factor: f64,
    pub seasonal_factor: f64,
}

impl ProductionFactors {
    /// Product of all factors.
    pub fn combined(&self) -> f64 {
        self.production_multiplier
            * self.temp_factor
            * self.humidity_factor
            * self.activity_factor
            * self.seasonal_factor
    }
}

/// Parameters of the production simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionModel {
    /// Base yield in kg/hour before any factor.
    pub base_rate_kg: f64,
    pub master_multiplier: f64,
    pub worker_multiplier: f64,
    pub optimal_temperature: RangeInclusive<f64>,
    pub off_temperature_factor: f64,
    pub optimal_humidity: RangeInclusive<f64>,
    pub off_humidity_factor: f64,
    /// Seasonal curve, peaking in late June.
    pub season: Sinusoid,
    /// Uniform random multiplier bounds `[low, high)`.
    pub jitter: (f64, f64),
}

impl Default for ProductionModel {
    fn default() -> Self {
        Self {
            base_rate_kg: 0.008,
            master_multiplier: 1.5,
            worker_multiplier: 1.0,
            optimal_temperature: 33.0..=37.0,
            off_temperature_factor: 0.7,
            optimal_humidity: 45.0..=65.0,
            off_humidity_factor: 0.8,
            season: Sinusoid::new(0.5, YEAR_DAYS).shifted(80.0),
            jitter: (0.7, 1.3),
        }
    }
}

impl ProductionModel {
    /// Seasonal factor, ranging over [0.5, 1.3].
    pub fn seasonal_factor(&self, day_of_year: u32) -> f64 {
        0.5 + 0.8 * (0.5 + self.season.at(f64::from(day_of_year)))
    }

    /// Condition factors for a hive at a given day.
    pub fn factors(
        &self,
        kind: HiveKind,
        day_of_year: u32,
        conditions: &HiveConditions,
    ) -> ProductionFactors {
        let production_multiplier = match kind {
            HiveKind::Master => self.master_multiplier,
            HiveKind::Worker => self.worker_multiplier,
        };
        let temp_factor = if self.optimal_temperature.contains(&conditions.temperature) {
            1.0
        } else {
            self.off_temperature_factor
        };
        let humidity_factor = if self.optimal_humidity.contains(&conditions.humidity) {
            1.0
        } else {
            self.off_humidity_factor
        };

        ProductionFactors {
            production_multiplier,
            temp_factor,
            humidity_factor,
            activity_factor: conditions.activity_fraction(),
            seasonal_factor: self.seasonal_factor(day_of_year),
        }
    }

    /// Honey produced in one hour, in kg.
    ///
    /// Zero outside [`PRODUCTION_HOURS`]; the random multiplier is only
    /// drawn inside the window.
    pub fn hourly_production(
        &self,
        kind: HiveKind,
        at: HourOfYear,
        conditions: &HiveConditions,
        rng: &mut (impl Rng + ?Sized),
    ) -> f64 {
        if !PRODUCTION_HOURS.contains(at.hour) {
            return 0.0;
        }

        let factors = self.factors(kind, at.day_of_year, conditions);
        let jitter = rng.gen_range(self.jitter.0..self.jitter.1);
        self.base_rate_kg * factors.combined() * jitter
    }

    /// Upper bound on hourly production for a hive kind on a given day.
    pub fn max_hourly_production(&self, kind: HiveKind, day_of_year: u32) -> f64 {
        let multiplier = match kind {
            HiveKind::Master => self.master_multiplier,
            HiveKind::Worker => self.worker_multiplier,
        };
        self.base_rate_kg * multiplier * self.jitter.1 * self.seasonal_factor(day_of_year)
    }
}

/// Production per unit of activity.
///
/// Defined as zero when the hive shows no activity.
pub fn production_efficiency(hourly_production: f64, activity_level: u8) -> f64 {
    if activity_level > 0 {
        hourly_production / (f64::from(activity_level) / 100.0)
    } else {
        0.0
    }
}

/// Running production totals, one per hive.
///
/// A ledger belongs to a single generation run and starts every hive at zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductionLedger {
    totals: HashMap<String, f64>,
}

impl ProductionLedger {
    /// Ledger with every hive of the topology at zero.
    pub fn for_topology(topology: &Topology) -> Self {
        Self {
            totals: topology
                .hives()
                .iter()
                .map(|h| (h.id.clone(), 0.0))
                .collect(),
        }
    }

    /// Add an hour of production and return the new running total.
    pub fn record(&mut self, hive_id: &str, kg: f64) -> f64 {
        let total = self.totals.entry(hive_id.to_string()).or_insert(0.0);
        *total += kg;
        *total
    }

    /// Running total for a hive (zero if never recorded).
    pub fn total(&self, hive_id: &str) -> f64 {
        self.totals.get(hive_id).copied().unwrap_or(0.0)
    }

    /// All running totals.
    pub fn totals(&self) -> &HashMap<String, f64> {
        &self.totals
    }

    /// Sum over all hives.
    pub fn fleet_total(&self) -> f64 {
        self.totals.values().sum()
    }
}
