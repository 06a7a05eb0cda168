// Apiary - Synthetic beehive telemetry
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Apiary
//!
//! Synthetic sensor and honey-production dataset for a small fleet of
//! beehives.
//!
//! A fixed topology of two master hives and five worker hives is walked hour
//! by hour over a trailing window. Each (hour, hive) pair yields a
//! [`Reading`] with simulated temperature, humidity, weight and activity,
//! plus hourly and cumulative honey production.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apiary::{generate_dataset, write_outputs, GeneratorConfig, OutputPaths, Topology};
//!
//! let topology = Topology::fleet();
//! let config = GeneratorConfig::new().with_days(30).with_seed(42);
//!
//! let dataset = generate_dataset(&config, &topology).unwrap();
//! write_outputs(&dataset, &topology, &OutputPaths::default()).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`topology`]: Hive records and structural validation
//! - [`window`]: Hourly time grid
//! - [`patterns`]: Sinusoids, noise and rounding helpers
//! - [`sensors`]: Temperature, humidity, weight and activity models
//! - [`production`]: Honey production model and per-hive ledger
//! - [`generator`]: Lazy reading generator and dataset builder
//! - [`dataset`]: In-memory dataset, summaries, JSON and CSV I/O
//! - [`output`]: Writing the two output files

pub mod dataset;
pub mod error;
pub mod generator;
pub mod output;
pub mod patterns;
pub mod production;
pub mod reading;
pub mod sensors;
pub mod topology;
pub mod window;

// Re-exports for convenience
pub use dataset::{Dataset, DatasetMetadata, HiveSummary};
pub use error::{ApiaryError, Result, TopologyError};
pub use generator::{generate_dataset, GeneratorConfig, HiveDataGenerator};
pub use output::{write_outputs, OutputPaths};
pub use production::{production_efficiency, ProductionFactors, ProductionLedger, ProductionModel};
pub use reading::Reading;
pub use sensors::{HiveConditions, SensorModel};
pub use topology::{Hive, HiveKind, Topology};
pub use window::{HourOfYear, TimeWindow, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
