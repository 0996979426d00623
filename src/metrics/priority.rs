//! Maintenance priority ranking of road segments.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use serde::Serialize;

use crate::condition::grade::MaintenancePriority;
use crate::error::ParseKindError;
use crate::model::{ConditionRecord, RoadClass, TrafficCount};
use crate::snapshot::Snapshot;

/// Which priority bands to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityLevel {
    #[default]
    All,
    Critical,
    High,
    Medium,
}

impl PriorityLevel {
    /// `All` admits every band except routine work.
    pub fn admits(self, priority: MaintenancePriority) -> bool {
        match self {
            Self::All => priority != MaintenancePriority::Routine,
            Self::Critical => priority == MaintenancePriority::Critical,
            Self::High => priority == MaintenancePriority::High,
            Self::Medium => priority == MaintenancePriority::Medium,
        }
    }
}

impl FromStr for PriorityLevel {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            _ => Err(ParseKindError::new("priority level", s)),
        }
    }
}

/// Ranking order of the priority list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Worst condition first.
    #[default]
    Condition,
    /// Highest latest traffic volume first.
    Traffic,
    /// National roads first, then worst condition.
    Class,
}

impl FromStr for SortBy {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "condition" => Ok(Self::Condition),
            "traffic" => Ok(Self::Traffic),
            "class" => Ok(Self::Class),
            _ => Err(ParseKindError::new("sort order", s)),
        }
    }
}

/// A road segment that needs maintenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityEntry {
    pub road_id: String,
    pub road_name: String,
    pub municipality: String,
    pub road_class: RoadClass,
    pub condition_index: f64,
    pub priority: MaintenancePriority,
    pub traffic_volume: u64,
}

/// Ranks roads by maintenance need.
///
/// A road's index is its most recent condition record, falling back to the
/// segment's last-known index; roads with neither are skipped. Traffic volume
/// is the road's most recent count, or 0.
pub fn maintenance_priorities(
    snapshot: &Snapshot,
    level: PriorityLevel,
    sort_by: SortBy,
) -> Vec<PriorityEntry> {
    let mut latest_condition: HashMap<&str, &ConditionRecord> = HashMap::new();
    for c in snapshot.conditions() {
        let slot = latest_condition.entry(c.road_id()).or_insert(c);
        if c.inspection_date() > slot.inspection_date() {
            *slot = c;
        }
    }

    let mut latest_traffic: HashMap<&str, &TrafficCount> = HashMap::new();
    for t in snapshot.traffic() {
        let slot = latest_traffic.entry(t.road_id()).or_insert(t);
        if t.count_date() > slot.count_date() {
            *slot = t;
        }
    }

    let mut entries: Vec<PriorityEntry> = snapshot
        .roads()
        .iter()
        .filter_map(|road| {
            let condition_index = latest_condition
                .get(road.id.as_str())
                .map(|c| c.overall_index())
                .or(road.condition_index)?;
            let priority = MaintenancePriority::from_index(condition_index);
            if !level.admits(priority) {
                return None;
            }

            Some(PriorityEntry {
                road_id: road.id.clone(),
                road_name: road.road_name.clone(),
                municipality: road.municipality.clone(),
                road_class: road.road_class,
                condition_index,
                priority,
                traffic_volume: latest_traffic
                    .get(road.id.as_str())
                    .map_or(0, |t| t.total_volume()),
            })
        })
        .collect();

    let by_condition =
        |a: &PriorityEntry, b: &PriorityEntry| a.condition_index.total_cmp(&b.condition_index);

    entries.sort_by(|a, b| -> Ordering {
        match sort_by {
            SortBy::Condition => by_condition(a, b),
            SortBy::Traffic => b
                .traffic_volume
                .cmp(&a.traffic_volume)
                .then_with(|| by_condition(a, b)),
            SortBy::Class => a
                .road_class
                .rank()
                .cmp(&b.road_class.rank())
                .then_with(|| by_condition(a, b)),
        }
    });

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ConditionDraft, RoadSegment, SurfaceDefects, SurfaceType, SyncStatus, TrafficDraft,
        VehicleCounts,
    };
    use chrono::{NaiveTime, TimeZone, Utc};

    fn road(id: &str, road_class: RoadClass, condition_index: Option<f64>) -> RoadSegment {
        RoadSegment {
            id: id.to_string(),
            road_name: format!("Road {id}"),
            road_class,
            surface_type: SurfaceType::Paved,
            length: 5.0,
            municipality: "eThekwini".to_string(),
            coordinates: vec![],
            condition_index,
            last_inspection: None,
        }
    }

    fn condition(road_id: &str, day: u32, cracking: f64) -> ConditionRecord {
        ConditionRecord::try_from(ConditionDraft {
            id: format!("{road_id}-{day}"),
            road_id: road_id.to_string(),
            inspection_date: Utc.with_ymd_and_hms(2026, 5, day, 10, 0, 0).unwrap(),
            surface_defects: SurfaceDefects {
                cracking,
                rutting: cracking,
                potholes: cracking,
            },
            structural_condition: 100.0 - cracking,
            riding_quality: 100.0 - cracking,
            photos: vec![],
            gps_location: (0.0, 0.0),
            engineer_id: "e".to_string(),
            sync_status: SyncStatus::Synced,
        })
        .unwrap()
    }

    fn traffic(road_id: &str, day: u32, cars: u32) -> TrafficCount {
        TrafficCount::from(TrafficDraft {
            id: format!("{road_id}-t{day}"),
            road_id: road_id.to_string(),
            count_date: Utc.with_ymd_and_hms(2026, 5, day, 7, 0, 0).unwrap(),
            vehicle_types: VehicleCounts {
                cars,
                ..Default::default()
            },
            peak_hour: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            engineer_id: "e".to_string(),
        })
    }

    fn roads_only(roads: Vec<RoadSegment>) -> Snapshot {
        Snapshot::new(roads, vec![], vec![])
    }

    fn ids(entries: &[PriorityEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.road_id.as_str()).collect()
    }

    #[test]
    fn test_latest_condition_wins_over_segment_index() {
        let roads = vec![road("a", RoadClass::Local, Some(90.0))];
        // The day-9 record (fair) is newer than the day-2 one (poor).
        let conditions = vec![condition("a", 9, 40.0), condition("a", 2, 90.0)];
        let snapshot = Snapshot::new(roads, conditions, vec![]);

        let entries = maintenance_priorities(&snapshot, PriorityLevel::All, SortBy::Condition);
        assert_eq!(entries.len(), 1);
        assert!((entries[0].condition_index - 60.0).abs() < 1e-9);
        assert_eq!(entries[0].priority, MaintenancePriority::Medium);
    }

    #[test]
    fn test_roads_without_index_are_skipped() {
        let snapshot = roads_only(vec![
            road("a", RoadClass::Local, None),
            road("b", RoadClass::Local, Some(20.0)),
        ]);
        let entries = maintenance_priorities(&snapshot, PriorityLevel::All, SortBy::Condition);
        assert_eq!(ids(&entries), vec!["b"]);
    }

    #[test]
    fn test_routine_roads_are_excluded() {
        let snapshot = roads_only(vec![road("a", RoadClass::Local, Some(85.0))]);
        let entries = maintenance_priorities(&snapshot, PriorityLevel::All, SortBy::Condition);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_level_filter() {
        let snapshot = roads_only(vec![
            road("a", RoadClass::Local, Some(10.0)),
            road("b", RoadClass::Local, Some(45.0)),
            road("c", RoadClass::Local, Some(65.0)),
        ]);
        let critical = maintenance_priorities(&snapshot, PriorityLevel::Critical, SortBy::Class);
        assert_eq!(ids(&critical), vec!["a"]);

        let high = maintenance_priorities(&snapshot, PriorityLevel::High, SortBy::Condition);
        assert_eq!(ids(&high), vec!["b"]);
    }

    #[test]
    fn test_sort_orders() {
        let roads = vec![
            road("local-bad", RoadClass::Local, Some(10.0)),
            road("national", RoadClass::Primary, Some(60.0)),
            road("district", RoadClass::Tertiary, Some(35.0)),
        ];
        let traffic = vec![
            traffic("national", 1, 900),
            traffic("district", 1, 100),
            traffic("district", 3, 1500),
        ];
        let snapshot = Snapshot::new(roads, vec![], traffic);

        let worst = maintenance_priorities(&snapshot, PriorityLevel::All, SortBy::Condition);
        assert_eq!(ids(&worst), vec!["local-bad", "district", "national"]);

        let busiest = maintenance_priorities(&snapshot, PriorityLevel::All, SortBy::Traffic);
        assert_eq!(ids(&busiest), vec!["district", "national", "local-bad"]);
        assert_eq!(busiest[0].traffic_volume, 1500);
        assert_eq!(busiest[2].traffic_volume, 0);

        let by_class = maintenance_priorities(&snapshot, PriorityLevel::All, SortBy::Class);
        assert_eq!(ids(&by_class), vec!["national", "district", "local-bad"]);
    }

    #[test]
    fn test_parse_options() {
        assert_eq!(
            "Critical".parse::<PriorityLevel>().unwrap(),
            PriorityLevel::Critical
        );
        assert_eq!("traffic".parse::<SortBy>().unwrap(), SortBy::Traffic);
        assert!("urgent".parse::<PriorityLevel>().is_err());
    }
}
