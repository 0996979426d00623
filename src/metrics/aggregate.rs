use chrono::NaiveDate;
use serde::Serialize;

use crate::metrics::utility::mean;
use crate::model::{ConditionRecord, RoadSegment, SurfaceType, TrafficCount};

/// Number of trailing traffic counts kept in the volume trend.
pub const TREND_WINDOW: usize = 7;

/// One point of the traffic volume trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub volume: u64,
}

/// Summary statistics for the whole road network.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    /// Sum of segment lengths in kilometres.
    pub total_road_length: f64,
    pub paved_percentage: f64,
    pub unpaved_percentage: f64,
    pub average_condition_index: f64,
    pub traffic_volume_trend: Vec<TrendPoint>,
}

/// Reduces the network collections into a [`NetworkMetrics`] snapshot.
///
/// Empty collections yield zero-valued metrics. When the network has any
/// length, `unpaved_percentage` is `100 - paved_percentage` so the two always
/// sum to 100; gravel and unpaved segments both count as unpaved. The trend
/// holds the last [`TREND_WINDOW`] traffic counts in their given order.
///
/// Segments that fail [`RoadSegment::validate`] are left out of the length
/// totals.
pub fn compute_network_metrics(
    roads: &[RoadSegment],
    conditions: &[ConditionRecord],
    traffic: &[TrafficCount],
) -> NetworkMetrics {
    let measured: Vec<&RoadSegment> = roads.iter().filter(|r| r.validate().is_ok()).collect();
    let total_road_length = measured.iter().fold(0.0, |acc, r| acc + r.length);
    let paved_length = measured
        .iter()
        .filter(|r| r.surface_type == SurfaceType::Paved)
        .fold(0.0, |acc, r| acc + r.length);

    let (paved_percentage, unpaved_percentage) = if total_road_length > 0.0 {
        let paved = paved_length / total_road_length * 100.0;
        (paved, 100.0 - paved)
    } else {
        (0.0, 0.0)
    };

    let indices: Vec<f64> = conditions
        .iter()
        .map(ConditionRecord::overall_index)
        .collect();

    let start = traffic.len().saturating_sub(TREND_WINDOW);
    let traffic_volume_trend = traffic[start..]
        .iter()
        .map(|t| TrendPoint {
            date: t.count_date().date_naive(),
            volume: t.total_volume(),
        })
        .collect();

    NetworkMetrics {
        total_road_length,
        paved_percentage,
        unpaved_percentage,
        average_condition_index: mean(&indices),
        traffic_volume_trend,
    }
}
