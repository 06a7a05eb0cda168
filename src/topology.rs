// Apiary - Hive topology
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Hive topology: the static table of master and worker hives.
//!
//! Worker hives belong to exactly one master hive. Masters have no parent,
//! so the hierarchy is at most two levels deep and cannot contain cycles.

use crate::error::{Result, TopologyError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Role of a hive in the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiveKind {
    /// Aggregation point for a site, larger colony.
    Master,
    /// Colony attached to a master.
    Worker,
}

impl HiveKind {
    /// Get kind name as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            HiveKind::Master => "master",
            HiveKind::Worker => "worker",
        }
    }
}

impl std::fmt::Display for HiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single hive record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hive {
    /// Unique identifier.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Master or worker.
    #[serde(rename = "type")]
    pub kind: HiveKind,
    /// Field grouping.
    pub location: String,
    /// Owning master (None for masters).
    pub master_id: Option<String>,
}

impl Hive {
    /// Create a master hive.
    pub fn master(id: &str, name: &str, location: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: HiveKind::Master,
            location: location.to_string(),
            master_id: None,
        }
    }

    /// Create a worker hive attached to `master_id`.
    pub fn worker(id: &str, name: &str, location: &str, master_id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: HiveKind::Worker,
            location: location.to_string(),
            master_id: Some(master_id.to_string()),
        }
    }

    /// Check if this is a master hive.
    pub fn is_master(&self) -> bool {
        self.kind == HiveKind::Master
    }
}

/// Ordered collection of hives.
///
/// Declaration order matters: generated readings iterate hives in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topology {
    hives: Vec<Hive>,
}

impl Topology {
    /// Create a topology from hives, checking structural invariants.
    pub fn new(hives: Vec<Hive>) -> std::result::Result<Self, TopologyError> {
        let topology = Self { hives };
        topology.validate()?;
        Ok(topology)
    }

    /// The fixed seven-hive fleet: two masters, five workers.
    pub fn fleet() -> Self {
        Self {
            hives: vec![
                Hive::master("master_001", "Master Hive Alpha", "North Field"),
                Hive::worker("worker_001", "Worker Hive 1", "North Field", "master_001"),
                Hive::worker("worker_002", "Worker Hive 2", "North Field", "master_001"),
                Hive::worker("worker_003", "Worker Hive 3", "East Field", "master_001"),
                Hive::master("master_002", "Master Hive Beta", "South Field"),
                Hive::worker("worker_004", "Worker Hive 4", "South Field", "master_002"),
                Hive::worker("worker_005", "Worker Hive 5", "West Field", "master_002"),
            ],
        }
    }

    /// Check ids are unique, masters have no parent and every worker
    /// references an existing master.
    pub fn validate(&self) -> std::result::Result<(), TopologyError> {
        if self.hives.is_empty() {
            return Err(TopologyError::Empty);
        }

        let mut seen = HashSet::new();
        for hive in &self.hives {
            if !seen.insert(hive.id.as_str()) {
                return Err(TopologyError::DuplicateId(hive.id.clone()));
            }
        }

        for hive in &self.hives {
            match (hive.kind, &hive.master_id) {
                (HiveKind::Master, None) => {}
                (HiveKind::Master, Some(master_id)) => {
                    return Err(TopologyError::MasterHasParent {
                        hive_id: hive.id.clone(),
                        master_id: master_id.clone(),
                    });
                }
                (HiveKind::Worker, None) => {
                    return Err(TopologyError::MissingMaster(hive.id.clone()));
                }
                (HiveKind::Worker, Some(master_id)) => match self.get(master_id) {
                    None => {
                        return Err(TopologyError::UnknownMaster {
                            hive_id: hive.id.clone(),
                            master_id: master_id.clone(),
                        });
                    }
                    Some(parent) if !parent.is_master() => {
                        return Err(TopologyError::ParentNotMaster {
                            hive_id: hive.id.clone(),
                            master_id: master_id.clone(),
                        });
                    }
                    Some(_) => {}
                },
            }
        }

        Ok(())
    }

    /// All hives in declaration order.
    pub fn hives(&self) -> &[Hive] {
        &self.hives
    }

    /// Number of hives.
    pub fn len(&self) -> usize {
        self.hives.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.hives.is_empty()
    }

    /// Look up a hive by id.
    pub fn get(&self, id: &str) -> Option<&Hive> {
        self.hives.iter().find(|h| h.id == id)
    }

    /// Master hives in declaration order.
    pub fn masters(&self) -> impl Iterator<Item = &Hive> {
        self.hives.iter().filter(|h| h.is_master())
    }

    /// Workers attached to `master_id`.
    pub fn workers_of<'a>(&'a self, master_id: &'a str) -> impl Iterator<Item = &'a Hive> {
        self.hives
            .iter()
            .filter(move |h| h.master_id.as_deref() == Some(master_id))
    }

    /// Distinct locations in first-seen order.
    pub fn locations(&self) -> Vec<&str> {
        let mut locations: Vec<&str> = Vec::new();
        for hive in &self.hives {
            if !locations.contains(&hive.location.as_str()) {
                locations.push(&hive.location);
            }
        }
        locations
    }

    /// Write the topology as a pretty JSON array, replacing any existing file.
    pub fn to_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;

        #[cfg(feature = "logging")]
        log::info!(
            "Wrote {} hives to {}",
            self.hives.len(),
            path.as_ref().display()
        );

        Ok(())
    }

    /// Read and validate a topology file.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let topology: Topology = serde_json::from_reader(reader)?;
        topology.validate()?;
        Ok(topology)
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::fleet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_fleet_shape() {
        let fleet = Topology::fleet();
        assert_eq!(fleet.len(), 7);
        assert_eq!(fleet.masters().count(), 2);
        assert_eq!(fleet.hives().iter().filter(|h| !h.is_master()).count(), 5);
        assert!(fleet.validate().is_ok());
    }

    #[test]
    fn test_fleet_groupings() {
        let fleet = Topology::fleet();

        let alpha: Vec<&str> = fleet.workers_of("master_001").map(|h| h.id.as_str()).collect();
        assert_eq!(alpha, vec!["worker_001", "worker_002", "worker_003"]);

        let beta: Vec<&str> = fleet.workers_of("master_002").map(|h| h.id.as_str()).collect();
        assert_eq!(beta, vec!["worker_004", "worker_005"]);

        for master in fleet.masters() {
            assert!(master.master_id.is_none());
        }
    }

    #[test]
    fn test_locations() {
        let fleet = Topology::fleet();
        assert_eq!(
            fleet.locations(),
            vec!["North Field", "East Field", "South Field", "West Field"]
        );
    }

    #[test]
    fn test_validate_rejects_unknown_master() {
        let result = Topology::new(vec![
            Hive::master("m1", "M1", "Field"),
            Hive::worker("w1", "W1", "Field", "m2"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            TopologyError::UnknownMaster {
                hive_id: "w1".to_string(),
                master_id: "m2".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_rejects_worker_parent() {
        let result = Topology::new(vec![
            Hive::master("m1", "M1", "Field"),
            Hive::worker("w1", "W1", "Field", "m1"),
            Hive::worker("w2", "W2", "Field", "w1"),
        ]);
        assert!(matches!(
            result,
            Err(TopologyError::ParentNotMaster { ref hive_id, .. }) if hive_id == "w2"
        ));
    }

    #[test]
    fn test_validate_rejects_master_with_parent() {
        let mut master = Hive::master("m2", "M2", "Field");
        master.master_id = Some("m1".to_string());
        let result = Topology::new(vec![Hive::master("m1", "M1", "Field"), master]);
        assert!(matches!(result, Err(TopologyError::MasterHasParent { .. })));
    }

    #[test]
    fn test_validate_rejects_orphan_and_duplicates() {
        let mut orphan = Hive::worker("w1", "W1", "Field", "m1");
        orphan.master_id = None;
        assert_eq!(
            Topology::new(vec![Hive::master("m1", "M1", "Field"), orphan]).unwrap_err(),
            TopologyError::MissingMaster("w1".to_string())
        );

        assert_eq!(
            Topology::new(vec![
                Hive::master("m1", "M1", "Field"),
                Hive::master("m1", "Again", "Field"),
            ])
            .unwrap_err(),
            TopologyError::DuplicateId("m1".to_string())
        );

        assert_eq!(Topology::new(Vec::new()).unwrap_err(), TopologyError::Empty);
    }

    #[test]
    fn test_json_shape() {
        let fleet = Topology::fleet();
        let value = serde_json::to_value(&fleet).unwrap();
        let first = &value[0];
        assert_eq!(first["id"], "master_001");
        assert_eq!(first["type"], "master");
        assert!(first["master_id"].is_null());
        assert_eq!(value[1]["master_id"], "master_001");

        let keys: Vec<&str> = first
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn test_json_roundtrip() {
        let fleet = Topology::fleet();
        let temp_file = NamedTempFile::new().unwrap();

        fleet.to_json(temp_file.path()).unwrap();
        let loaded = Topology::from_json(temp_file.path()).unwrap();

        assert_eq!(loaded, fleet);
    }

    #[test]
    fn test_from_json_validates() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(
            temp_file.path(),
            r#"[{"id":"w1","name":"W1","type":"worker","location":"X","master_id":"m9"}]"#,
        )
        .unwrap();

        let result = Topology::from_json(temp_file.path());
        assert!(matches!(
            result,
            Err(crate::ApiaryError::Topology(TopologyError::UnknownMaster { .. }))
        ));
    }
}
