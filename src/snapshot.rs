//! Owned snapshot of the road, condition, and traffic collections.
//!
//! The snapshot is the only state the application holds; every metric is
//! derived by passing its collections into the pure aggregators.
//!
//! Stored on disk as a JSON object:
//! ```json
//! { "roads": [...], "conditions": [...], "traffic": [...] }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::metrics::aggregate::{NetworkMetrics, compute_network_metrics};
use crate::model::{ConditionRecord, RoadSegment, TrafficCount};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    roads: Vec<RoadSegment>,
    #[serde(default)]
    conditions: Vec<ConditionRecord>,
    #[serde(default)]
    traffic: Vec<TrafficCount>,
}

impl Snapshot {
    pub fn new(
        roads: Vec<RoadSegment>,
        conditions: Vec<ConditionRecord>,
        traffic: Vec<TrafficCount>,
    ) -> Self {
        Self {
            roads,
            conditions,
            traffic,
        }
    }

    /// Parses a snapshot from JSON, rejecting roads with invalid lengths.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a stored condition has an
    /// out-of-range rating, or a road length fails [`RoadSegment::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        for road in &snapshot.roads {
            road.validate()
                .with_context(|| format!("invalid road '{}'", road.id))?;
        }
        Ok(snapshot)
    }

    /// Loads a snapshot from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot '{}'", path.display()))?;
        let snapshot = Self::from_json(&content)
            .with_context(|| format!("failed to parse snapshot '{}'", path.display()))?;

        debug!(
            path = %path.display(),
            roads = snapshot.roads.len(),
            conditions = snapshot.conditions.len(),
            traffic = snapshot.traffic.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Like [`Snapshot::load`], but a missing file yields an empty snapshot.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Snapshot not found, starting empty");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Writes the snapshot as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body)
            .with_context(|| format!("failed to write snapshot '{}'", path.display()))?;

        debug!(path = %path.display(), "Snapshot saved");
        Ok(())
    }

    pub fn roads(&self) -> &[RoadSegment] {
        &self.roads
    }

    pub fn conditions(&self) -> &[ConditionRecord] {
        &self.conditions
    }

    pub fn traffic(&self) -> &[TrafficCount] {
        &self.traffic
    }

    pub fn road(&self, id: &str) -> Option<&RoadSegment> {
        self.roads.iter().find(|r| r.id == id)
    }

    /// Appends a captured condition record. Records are never edited in place.
    pub fn add_condition(&mut self, record: ConditionRecord) {
        self.conditions.push(record);
    }

    pub fn add_traffic(&mut self, count: TrafficCount) {
        self.traffic.push(count);
    }

    pub fn metrics(&self) -> NetworkMetrics {
        compute_network_metrics(&self.roads, &self.conditions, &self.traffic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    const NETWORK: &str = r#"{
        "roads": [
            { "id": "r1", "roadName": "N3", "roadClass": "primary", "surfaceType": "paved",
              "length": 10, "municipality": "eThekwini", "coordinates": [[-29.85, 31.02], [-29.80, 30.95]] },
            { "id": "r2", "roadName": "D1127", "roadClass": "tertiary", "surfaceType": "gravel",
              "length": 30, "municipality": "Ugu" }
        ]
    }"#;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_from_json_defaults_missing_collections() {
        let snapshot = Snapshot::from_json(NETWORK).unwrap();
        assert_eq!(snapshot.roads().len(), 2);
        assert!(snapshot.conditions().is_empty());
        assert!(snapshot.traffic().is_empty());
        assert_eq!(snapshot.road("r2").unwrap().road_name, "D1127");
    }

    #[test]
    fn test_metrics_from_snapshot() {
        let metrics = Snapshot::from_json(NETWORK).unwrap().metrics();
        assert_eq!(metrics.total_road_length, 40.0);
        assert_eq!(metrics.paved_percentage, 25.0);
        assert_eq!(metrics.unpaved_percentage, 75.0);
    }

    #[test]
    fn test_negative_length_fails_load() {
        let json = r#"{ "roads": [ { "id": "bad", "roadName": "x", "roadClass": "local",
            "surfaceType": "paved", "length": -2, "municipality": "Namakwa" } ] }"#;
        let err = Snapshot::from_json(json).unwrap_err();
        assert!(format!("{err:#}").contains("length must not be negative"));
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roadnet_rater_test_snapshot.json");
        let _ = fs::remove_file(&path);

        let snapshot = Snapshot::from_json(NETWORK).unwrap();
        snapshot.save(&path).unwrap();
        let loaded = Snapshot::load(&path).unwrap();
        assert_eq!(loaded, snapshot);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let path = temp_path("roadnet_rater_test_missing.json");
        let _ = fs::remove_file(&path);
        let snapshot = Snapshot::load_or_default(&path).unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }
}
