// Apiary - Error types
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Error types for Apiary
//!
//! Generation itself never fails; errors come from file I/O, serialization
//! and topology validation.

use thiserror::Error;

/// Result type alias for Apiary operations
pub type Result<T> = std::result::Result<T, ApiaryError>;

/// Main error type for Apiary operations
#[derive(Error, Debug)]
pub enum ApiaryError {
    /// Filesystem error while reading or writing an output file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Hive topology violates a structural invariant
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    /// Loaded file holds no readings
    #[error("No readings in {0}")]
    EmptyDataset(String),

    /// Generator configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Structural violations of a hive topology
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// Topology has no hives at all
    #[error("Topology is empty")]
    Empty,

    /// Two hives share an identifier
    #[error("Duplicate hive id: {0}")]
    DuplicateId(String),

    /// A master hive references a parent
    #[error("Master hive {hive_id} must not reference a master, found {master_id}")]
    MasterHasParent { hive_id: String, master_id: String },

    /// A worker hive has no master reference
    #[error("Worker hive {0} has no master_id")]
    MissingMaster(String),

    /// A worker references an id that does not exist
    #[error("Worker hive {hive_id} references unknown master {master_id}")]
    UnknownMaster { hive_id: String, master_id: String },

    /// A worker references a hive that is not a master
    #[error("Worker hive {hive_id} references {master_id}, which is not a master")]
    ParentNotMaster { hive_id: String, master_id: String },
}
