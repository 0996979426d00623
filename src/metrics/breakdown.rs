//! Per-category counts over the network collections.

use serde::Serialize;

use crate::condition::grade::ConditionClass;
use crate::metrics::utility::pct;
use crate::model::{ConditionRecord, RoadClass, RoadSegment, TrafficCount, VehicleType};

/// Number of road segments in a road class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoadClassShare {
    pub road_class: RoadClass,
    pub count: usize,
    pub share_percent: f64,
}

/// Number of condition records in a condition class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionShare {
    pub class: ConditionClass,
    pub count: usize,
    pub share_percent: f64,
}

/// Vehicles of one type across a set of traffic counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleTypeShare {
    pub vehicle_type: VehicleType,
    pub count: u64,
    pub share_percent: f64,
}

/// Counts roads per class, in [`RoadClass::ALL`] order. Classes with no
/// roads are still listed.
pub fn road_class_distribution(roads: &[RoadSegment]) -> Vec<RoadClassShare> {
    RoadClass::ALL
        .into_iter()
        .map(|road_class| {
            let count = roads.iter().filter(|r| r.road_class == road_class).count();
            RoadClassShare {
                road_class,
                count,
                share_percent: pct(count as u64, roads.len() as u64),
            }
        })
        .collect()
}

/// Counts condition records per Good/Fair/Poor class.
pub fn condition_distribution(conditions: &[ConditionRecord]) -> Vec<ConditionShare> {
    ConditionClass::ALL
        .into_iter()
        .map(|class| {
            let count = conditions
                .iter()
                .filter(|c| ConditionClass::from_index(c.overall_index()) == class)
                .count();
            ConditionShare {
                class,
                count,
                share_percent: pct(count as u64, conditions.len() as u64),
            }
        })
        .collect()
}

/// Sums each vehicle type over `traffic`, in [`VehicleType::ALL`] order.
pub fn vehicle_type_distribution(traffic: &[TrafficCount]) -> Vec<VehicleTypeShare> {
    let total: u64 = traffic.iter().map(|t| t.total_volume()).sum();
    VehicleType::ALL
        .into_iter()
        .map(|vehicle_type| {
            let count: u64 = traffic
                .iter()
                .map(|t| u64::from(t.vehicle_types().get(vehicle_type)))
                .sum();
            VehicleTypeShare {
                vehicle_type,
                count,
                share_percent: pct(count, total),
            }
        })
        .collect()
}
