//! Field capture: validated construction of condition and traffic records.

use chrono::{DateTime, NaiveTime, Utc};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::model::{
    ConditionDraft, ConditionRecord, SurfaceDefects, SyncStatus, TrafficCount, TrafficDraft,
    VehicleCounts,
};

/// Raw condition form values. Any rating may be left blank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionInput {
    pub road_id: String,
    pub cracking: Option<f64>,
    pub rutting: Option<f64>,
    pub potholes: Option<f64>,
    pub structural_condition: Option<f64>,
    pub riding_quality: Option<f64>,
    #[serde(default)]
    pub photos: Vec<String>,
    /// `(latitude, longitude)`; `(0, 0)` when no fix was taken.
    pub gps_location: Option<(f64, f64)>,
}

/// Raw traffic form values. Blank counts are zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficInput {
    pub road_id: String,
    #[serde(default)]
    pub counts: VehicleCounts,
    pub peak_hour: NaiveTime,
}

fn required(field: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
    value.ok_or(ValidationError::Missing { field })
}

fn required_id(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing { field });
    }
    Ok(value)
}

/// Builds a scored [`ConditionRecord`] from form input.
///
/// The record is marked [`SyncStatus::Synced`] when captured online and
/// [`SyncStatus::Offline`] otherwise.
///
/// # Errors
///
/// Returns [`ValidationError`] if the road is not chosen or a rating is
/// missing, NaN, or outside `[0, 100]`.
pub fn capture_condition(
    input: ConditionInput,
    engineer_id: &str,
    online: bool,
    now: DateTime<Utc>,
) -> Result<ConditionRecord, ValidationError> {
    let draft = ConditionDraft {
        id: Uuid::new_v4().to_string(),
        road_id: required_id("road_id", input.road_id)?,
        inspection_date: now,
        surface_defects: SurfaceDefects {
            cracking: required("cracking", input.cracking)?,
            rutting: required("rutting", input.rutting)?,
            potholes: required("potholes", input.potholes)?,
        },
        structural_condition: required("structural_condition", input.structural_condition)?,
        riding_quality: required("riding_quality", input.riding_quality)?,
        photos: input.photos,
        gps_location: input.gps_location.unwrap_or((0.0, 0.0)),
        engineer_id: engineer_id.to_string(),
        sync_status: if online {
            SyncStatus::Synced
        } else {
            SyncStatus::Offline
        },
    };

    let record = ConditionRecord::try_from(draft)?;
    debug!(
        id = record.id(),
        road_id = record.road_id(),
        overall_index = record.overall_index(),
        sync_status = %record.sync_status(),
        "Condition captured"
    );
    Ok(record)
}

/// Builds a [`TrafficCount`] from form input.
///
/// # Errors
///
/// Returns [`ValidationError::Missing`] if no road is chosen.
pub fn capture_traffic(
    input: TrafficInput,
    engineer_id: &str,
    now: DateTime<Utc>,
) -> Result<TrafficCount, ValidationError> {
    let count = TrafficCount::from(TrafficDraft {
        id: Uuid::new_v4().to_string(),
        road_id: required_id("road_id", input.road_id)?,
        count_date: now,
        vehicle_types: input.counts,
        peak_hour: input.peak_hour,
        engineer_id: engineer_id.to_string(),
    });

    debug!(
        id = count.id(),
        road_id = count.road_id(),
        total_volume = count.total_volume(),
        "Traffic count captured"
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> ConditionInput {
        ConditionInput {
            road_id: "r1".to_string(),
            cracking: Some(20.0),
            rutting: Some(10.0),
            potholes: Some(5.0),
            structural_condition: Some(80.0),
            riding_quality: Some(90.0),
            photos: vec!["photos/r1-front.jpg".to_string()],
            gps_location: Some((-33.92, 18.42)),
        }
    }

    #[test]
    fn test_capture_condition_online() {
        let now = Utc::now();
        let record = capture_condition(full_input(), "eng-7", true, now).unwrap();

        assert_eq!(record.road_id(), "r1");
        assert_eq!(record.engineer_id(), "eng-7");
        assert_eq!(record.inspection_date(), now);
        assert_eq!(record.sync_status(), SyncStatus::Synced);
        assert_eq!(record.photos().len(), 1);
        assert!((record.overall_index() - 87.0).abs() < 1e-9);
        assert!(Uuid::parse_str(record.id()).is_ok());
    }

    #[test]
    fn test_capture_condition_offline() {
        let record = capture_condition(full_input(), "eng-7", false, Utc::now()).unwrap();
        assert_eq!(record.sync_status(), SyncStatus::Offline);
    }

    #[test]
    fn test_missing_rating_is_rejected() {
        let input = ConditionInput {
            potholes: None,
            ..full_input()
        };
        let err = capture_condition(input, "eng-7", true, Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "potholes" });
    }

    #[test]
    fn test_out_of_range_rating_is_rejected() {
        let input = ConditionInput {
            riding_quality: Some(100.1),
            ..full_input()
        };
        let err = capture_condition(input, "eng-7", true, Utc::now()).unwrap_err();
        assert_eq!(err.field(), "riding_quality");
    }

    #[test]
    fn test_blank_road_is_rejected() {
        let input = ConditionInput {
            road_id: "  ".to_string(),
            ..full_input()
        };
        let err = capture_condition(input, "eng-7", true, Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "road_id" });
    }

    #[test]
    fn test_missing_gps_defaults_to_origin() {
        let input = ConditionInput {
            gps_location: None,
            ..full_input()
        };
        let record = capture_condition(input, "eng-7", true, Utc::now()).unwrap();
        assert_eq!(record.gps_location(), (0.0, 0.0));
    }

    #[test]
    fn test_capture_traffic_sums_counts() {
        let input = TrafficInput {
            road_id: "r1".to_string(),
            counts: VehicleCounts {
                cars: 410,
                trucks: 55,
                buses: 12,
                motorcycles: 23,
            },
            peak_hour: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
        };

        let count = capture_traffic(input, "eng-7", Utc::now()).unwrap();
        assert_eq!(count.total_volume(), 500);
        assert_eq!(count.engineer_id(), "eng-7");
    }

    #[test]
    fn test_traffic_input_blank_counts_are_zero() {
        let input: TrafficInput = serde_json::from_str(
            r#"{ "roadId": "r1", "counts": { "cars": 3, "buses": 1 }, "peakHour": "17:00:00" }"#,
        )
        .unwrap();
        let count = capture_traffic(input, "eng-7", Utc::now()).unwrap();
        assert_eq!(count.total_volume(), 4);
        assert_eq!(count.vehicle_types().trucks, 0);
    }
}
