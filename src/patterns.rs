// Apiary - Signal patterns
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Periodic components and noise sources shared by the sensor and
//! production models.

use rand::prelude::*;
use rand_distr::StandardNormal;
use std::f64::consts::PI;

/// Hours in a day.
pub const DAY_HOURS: f64 = 24.0;

/// Days in the seasonal cycle (leap days are not special-cased).
pub const YEAR_DAYS: f64 = 365.0;

/// Sinusoidal component.
///
/// `value = amplitude * sin(2*PI*(x - phase)/period)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sinusoid {
    pub amplitude: f64,
    pub period: f64,
    pub phase: f64,
}

impl Sinusoid {
    /// Sinusoid starting at phase zero.
    pub const fn new(amplitude: f64, period: f64) -> Self {
        Self {
            amplitude,
            period,
            phase: 0.0,
        }
    }

    /// Shift the curve right by `phase` units of `x`.
    pub const fn shifted(self, phase: f64) -> Self {
        Self { phase, ..self }
    }

    /// Evaluate at `x` (hours or days, matching `period`).
    pub fn at(&self, x: f64) -> f64 {
        self.amplitude * (2.0 * PI * (x - self.phase) / self.period).sin()
    }

    /// 24-hour cycle.
    pub const fn diurnal(amplitude: f64) -> Self {
        Self::new(amplitude, DAY_HOURS)
    }

    /// 365-day cycle.
    pub const fn seasonal(amplitude: f64) -> Self {
        Self::new(amplitude, YEAR_DAYS)
    }
}

/// Zero-mean Gaussian noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Noise {
    pub std_dev: f64,
}

impl Noise {
    pub const fn new(std_dev: f64) -> Self {
        Self { std_dev }
    }

    /// Draw one sample.
    pub fn sample(&self, rng: &mut (impl Rng + ?Sized)) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        z * self.std_dev
    }
}

/// Inclusive hour-of-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourWindow {
    pub first: u32,
    pub last: u32,
}

impl HourWindow {
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    /// Check if `hour` falls inside the window (both ends included).
    pub fn contains(&self, hour: u32) -> bool {
        (self.first..=self.last).contains(&hour)
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
