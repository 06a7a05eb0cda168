// Apiary - Hive sensor models
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Simulated in-hive sensors: temperature, humidity, weight and flight
//! activity.
//!
//! Each channel is a baseline plus diurnal and seasonal sinusoids plus
//! Gaussian noise. Noise is drawn in a fixed order (temperature, humidity,
//! weight, activity) so seeded runs are reproducible.

use crate::patterns::{HourWindow, Noise, Sinusoid};
use crate::topology::HiveKind;
use crate::window::HourOfYear;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Hours during which bees forage (weight dip, daytime activity).
pub const FORAGING_HOURS: HourWindow = HourWindow::new(6, 18);

/// Sensor values for one hive at one instant, before output rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HiveConditions {
    /// Brood temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %, within [30, 90].
    pub humidity: f64,
    /// Hive weight in kg.
    pub weight: f64,
    /// Flight activity as a whole percentage.
    pub activity_level: u8,
}

impl HiveConditions {
    /// Activity as a fraction in [0, 1].
    pub fn activity_fraction(&self) -> f64 {
        f64::from(self.activity_level) / 100.0
    }
}

/// Parameters of the sensor simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorModel {
    pub temperature_base: f64,
    pub temperature_daily: Sinusoid,
    pub temperature_seasonal: Sinusoid,
    pub temperature_noise: Noise,

    pub humidity_base: f64,
    pub humidity_daily: Sinusoid,
    pub humidity_seasonal: Sinusoid,
    pub humidity_noise: Noise,
    pub humidity_range: (f64, f64),

    pub master_weight: f64,
    pub worker_weight: f64,
    pub weight_seasonal: Sinusoid,
    pub foraging_dip: Sinusoid,
    pub weight_noise: Noise,

    pub activity_day_base: f64,
    pub activity_night_base: f64,
    pub activity_daily: Sinusoid,
    pub activity_noise: Noise,
}

impl Default for SensorModel {
    fn default() -> Self {
        Self {
            temperature_base: 35.0,
            temperature_daily: Sinusoid::diurnal(3.0),
            temperature_seasonal: Sinusoid::seasonal(2.0),
            temperature_noise: Noise::new(0.5),

            // Humidity falls as the hive warms during the day
            humidity_base: 65.0,
            humidity_daily: Sinusoid::diurnal(-10.0),
            humidity_seasonal: Sinusoid::seasonal(5.0),
            humidity_noise: Noise::new(2.0),
            humidity_range: (30.0, 90.0),

            master_weight: 40.0,
            worker_weight: 32.0,
            weight_seasonal: Sinusoid::seasonal(5.0),
            foraging_dip: Sinusoid::diurnal(-2.0).shifted(6.0),
            weight_noise: Noise::new(0.3),

            activity_day_base: 50.0,
            activity_night_base: 20.0,
            activity_daily: Sinusoid::new(30.0, 12.0).shifted(6.0),
            activity_noise: Noise::new(10.0),
        }
    }
}

impl SensorModel {
    /// Sample all channels for a hive at the given hour.
    pub fn sample(
        &self,
        kind: HiveKind,
        at: HourOfYear,
        rng: &mut (impl Rng + ?Sized),
    ) -> HiveConditions {
        let hour = f64::from(at.hour);
        let day = f64::from(at.day_of_year);
        let foraging = FORAGING_HOURS.contains(at.hour);

        let temperature = self.temperature_base
            + self.temperature_daily.at(hour)
            + self.temperature_seasonal.at(day)
            + self.temperature_noise.sample(rng);

        let humidity = self.humidity_base
            + self.humidity_daily.at(hour)
            + self.humidity_seasonal.at(day)
            + self.humidity_noise.sample(rng);
        let humidity = humidity.clamp(self.humidity_range.0, self.humidity_range.1);

        let base_weight = match kind {
            HiveKind::Master => self.master_weight,
            HiveKind::Worker => self.worker_weight,
        };
        let daily_weight = if foraging {
            self.foraging_dip.at(hour)
        } else {
            0.0
        };
        let weight = base_weight
            + self.weight_seasonal.at(day)
            + daily_weight
            + self.weight_noise.sample(rng);

        let base_activity = if foraging {
            self.activity_day_base + self.activity_daily.at(hour)
        } else {
            self.activity_night_base
        };
        let activity = (base_activity + self.activity_noise.sample(rng)).clamp(0.0, 100.0);

        HiveConditions {
            temperature,
            humidity,
            weight,
            activity_level: activity.round() as u8,
        }
    }
}
