// Apiary - Output files
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Writing the readings and topology files.
//!
//! Writes are independent and unguarded: the first failure is returned as-is,
//! with no retry and no cleanup of files already written.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::topology::Topology;
use std::path::{Path, PathBuf};

/// Default readings file name.
pub const READINGS_FILE: &str = "beehive_data.json";

/// Default topology file name.
pub const TOPOLOGY_FILE: &str = "hives_config.json";

/// Destination paths for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub readings: PathBuf,
    pub topology: PathBuf,
    /// Optional CSV copy of the readings.
    pub csv: Option<PathBuf>,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            readings: PathBuf::from(READINGS_FILE),
            topology: PathBuf::from(TOPOLOGY_FILE),
            csv: None,
        }
    }
}

impl OutputPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            readings: dir.join(READINGS_FILE),
            topology: dir.join(TOPOLOGY_FILE),
            csv: None,
        }
    }

    /// Also export readings as CSV.
    pub fn with_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv = Some(path.into());
        self
    }
}

/// Write readings, then topology, then the optional CSV.
pub fn write_outputs(dataset: &Dataset, topology: &Topology, paths: &OutputPaths) -> Result<()> {
    dataset.to_json(&paths.readings)?;
    topology.to_json(&paths.topology)?;
    if let Some(csv) = &paths.csv {
        dataset.to_csv(csv)?;
    }
    Ok(())
}
