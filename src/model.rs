//! Road network data model: segments, condition assessments, and traffic counts.
//!
//! Condition and traffic records are immutable once built. Their derived
//! values (overall index, total volume) are computed on construction and
//! recomputed whenever a stored record is deserialized.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::condition::index::compute_overall_index;
use crate::error::{ParseKindError, ValidationError};

/// Authority/hierarchy category of a road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadClass {
    Primary,
    Secondary,
    Tertiary,
    Local,
}

impl RoadClass {
    /// All classes, highest authority first.
    pub const ALL: [RoadClass; 4] = [
        RoadClass::Primary,
        RoadClass::Secondary,
        RoadClass::Tertiary,
        RoadClass::Local,
    ];

    /// Display name used on dashboards and reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Primary => "National",
            Self::Secondary => "Provincial",
            Self::Tertiary => "District",
            Self::Local => "Local",
        }
    }

    /// Long-form name listing the routes the class covers.
    pub fn description(self) -> &'static str {
        match self {
            Self::Primary => "National Roads (N1, N2, N3, etc.)",
            Self::Secondary => "Provincial Roads (R-routes)",
            Self::Tertiary => "District Roads",
            Self::Local => "Local/Municipal Roads",
        }
    }

    /// Ordering used when ranking maintenance work by class (0 = first).
    pub fn rank(self) -> u8 {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
            Self::Tertiary => 2,
            Self::Local => 3,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for RoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RoadClass {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseKindError::new("road class", s))
    }
}

/// Physical pavement category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceType {
    Paved,
    Unpaved,
    Gravel,
}

/// Whether a field-captured record has reached the remote persistence system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Synced,
    Pending,
    Offline,
}

impl SyncStatus {
    pub fn is_synced(self) -> bool {
        matches!(self, Self::Synced)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synced => write!(f, "synced"),
            Self::Pending => write!(f, "pending"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Dashboard role of the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Engineer,
    Viewer,
    Analyst,
}

impl FromStr for Role {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "engineer" => Ok(Self::Engineer),
            "viewer" => Ok(Self::Viewer),
            "analyst" => Ok(Self::Analyst),
            _ => Err(ParseKindError::new("role", s)),
        }
    }
}

/// A road segment from the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadSegment {
    pub id: String,
    pub road_name: String,
    pub road_class: RoadClass,
    pub surface_type: SurfaceType,
    /// Length in kilometres.
    pub length: f64,
    pub municipality: String,
    /// Ordered `(latitude, longitude)` pairs.
    #[serde(default)]
    pub coordinates: Vec<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_inspection: Option<DateTime<Utc>>,
}

impl RoadSegment {
    /// Rejects segments whose length is negative, infinite, or NaN.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.length.is_nan() {
            return Err(ValidationError::NotANumber { field: "length" });
        }
        if self.length.is_infinite() {
            return Err(ValidationError::Infinite { field: "length" });
        }
        if self.length < 0.0 {
            return Err(ValidationError::Negative {
                field: "length",
                value: self.length,
            });
        }
        Ok(())
    }
}

/// Surface defect percentages. Higher is worse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDefects {
    pub cracking: f64,
    pub rutting: f64,
    pub potholes: f64,
}

/// Everything a condition assessment records except its derived index.
///
/// This is also the stored form: any `overallIndex` present in stored JSON is
/// ignored and recomputed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionDraft {
    pub id: String,
    pub road_id: String,
    pub inspection_date: DateTime<Utc>,
    pub surface_defects: SurfaceDefects,
    pub structural_condition: f64,
    pub riding_quality: f64,
    #[serde(default)]
    pub photos: Vec<String>,
    /// `(latitude, longitude)` where the assessment was taken.
    pub gps_location: (f64, f64),
    pub engineer_id: String,
    pub sync_status: SyncStatus,
}

/// A scored condition assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ConditionDraft")]
pub struct ConditionRecord {
    id: String,
    road_id: String,
    inspection_date: DateTime<Utc>,
    surface_defects: SurfaceDefects,
    structural_condition: f64,
    riding_quality: f64,
    overall_index: f64,
    photos: Vec<String>,
    gps_location: (f64, f64),
    engineer_id: String,
    sync_status: SyncStatus,
}

impl TryFrom<ConditionDraft> for ConditionRecord {
    type Error = ValidationError;

    fn try_from(draft: ConditionDraft) -> Result<Self, Self::Error> {
        let overall_index = compute_overall_index(
            &draft.surface_defects,
            draft.structural_condition,
            draft.riding_quality,
        )?;

        Ok(Self {
            id: draft.id,
            road_id: draft.road_id,
            inspection_date: draft.inspection_date,
            surface_defects: draft.surface_defects,
            structural_condition: draft.structural_condition,
            riding_quality: draft.riding_quality,
            overall_index,
            photos: draft.photos,
            gps_location: draft.gps_location,
            engineer_id: draft.engineer_id,
            sync_status: draft.sync_status,
        })
    }
}

impl ConditionRecord {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn road_id(&self) -> &str {
        &self.road_id
    }

    pub fn inspection_date(&self) -> DateTime<Utc> {
        self.inspection_date
    }

    pub fn surface_defects(&self) -> &SurfaceDefects {
        &self.surface_defects
    }

    pub fn structural_condition(&self) -> f64 {
        self.structural_condition
    }

    pub fn riding_quality(&self) -> f64 {
        self.riding_quality
    }

    /// Weighted 0–100 score derived from the measurements.
    pub fn overall_index(&self) -> f64 {
        self.overall_index
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn gps_location(&self) -> (f64, f64) {
        self.gps_location
    }

    pub fn engineer_id(&self) -> &str {
        &self.engineer_id
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.sync_status
    }
}

/// Vehicle categories counted in a traffic survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Truck,
    Bus,
    Motorcycle,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [Self::Car, Self::Truck, Self::Bus, Self::Motorcycle];

    pub fn label(self) -> &'static str {
        match self {
            Self::Car => "Cars",
            Self::Truck => "Trucks",
            Self::Bus => "Buses",
            Self::Motorcycle => "Motorcycles",
        }
    }
}

/// Per-vehicle-type counts for a traffic survey.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleCounts {
    pub cars: u32,
    pub trucks: u32,
    pub buses: u32,
    pub motorcycles: u32,
}

impl VehicleCounts {
    pub fn get(&self, vehicle_type: VehicleType) -> u32 {
        match vehicle_type {
            VehicleType::Car => self.cars,
            VehicleType::Truck => self.trucks,
            VehicleType::Bus => self.buses,
            VehicleType::Motorcycle => self.motorcycles,
        }
    }

    pub fn total(&self) -> u64 {
        u64::from(self.cars)
            + u64::from(self.trucks)
            + u64::from(self.buses)
            + u64::from(self.motorcycles)
    }
}

/// Stored form of a traffic count; `totalVolume` is never read back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficDraft {
    pub id: String,
    pub road_id: String,
    pub count_date: DateTime<Utc>,
    pub vehicle_types: VehicleCounts,
    pub peak_hour: NaiveTime,
    pub engineer_id: String,
}

/// A traffic survey whose total volume always equals the sum of its counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TrafficDraft")]
pub struct TrafficCount {
    id: String,
    road_id: String,
    count_date: DateTime<Utc>,
    vehicle_types: VehicleCounts,
    total_volume: u64,
    peak_hour: NaiveTime,
    engineer_id: String,
}

impl From<TrafficDraft> for TrafficCount {
    fn from(draft: TrafficDraft) -> Self {
        Self {
            total_volume: draft.vehicle_types.total(),
            id: draft.id,
            road_id: draft.road_id,
            count_date: draft.count_date,
            vehicle_types: draft.vehicle_types,
            peak_hour: draft.peak_hour,
            engineer_id: draft.engineer_id,
        }
    }
}

impl TrafficCount {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn road_id(&self) -> &str {
        &self.road_id
    }

    pub fn count_date(&self) -> DateTime<Utc> {
        self.count_date
    }

    pub fn vehicle_types(&self) -> &VehicleCounts {
        &self.vehicle_types
    }

    pub fn total_volume(&self) -> u64 {
        self.total_volume
    }

    pub fn peak_hour(&self) -> NaiveTime {
        self.peak_hour
    }

    pub fn engineer_id(&self) -> &str {
        &self.engineer_id
    }
}
