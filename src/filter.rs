//! Report filters that narrow a snapshot before aggregation.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::condition::grade::ConditionClass;
use crate::model::{ConditionRecord, RoadClass, RoadSegment};
use crate::snapshot::Snapshot;

/// Criteria for a report. Unset fields match everything; the date range is
/// inclusive on both ends. `condition_class` narrows condition records only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    pub municipality: Option<String>,
    pub road_class: Option<RoadClass>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub condition_class: Option<ConditionClass>,
}

impl ReportFilter {
    pub fn admits_road(&self, road: &RoadSegment) -> bool {
        self.municipality
            .as_deref()
            .is_none_or(|m| road.municipality.eq_ignore_ascii_case(m))
            && self.road_class.is_none_or(|c| road.road_class == c)
    }

    pub fn admits_date(&self, at: DateTime<Utc>) -> bool {
        let date = at.date_naive();
        self.date_from.is_none_or(|from| date >= from) && self.date_to.is_none_or(|to| date <= to)
    }

    pub fn admits_condition(&self, record: &ConditionRecord) -> bool {
        let class = ConditionClass::from_index(record.overall_index());
        let class_ok = self.condition_class.is_none_or(|c| c == class);
        class_ok && self.admits_date(record.inspection_date())
    }

    /// Returns a new snapshot holding the matching roads, plus the condition
    /// and traffic records on those roads within the date range.
    pub fn apply(&self, snapshot: &Snapshot) -> Snapshot {
        let roads: Vec<RoadSegment> = snapshot
            .roads()
            .iter()
            .filter(|r| self.admits_road(r))
            .cloned()
            .collect();
        let road_ids: HashSet<&str> = roads.iter().map(|r| r.id.as_str()).collect();

        let conditions = snapshot
            .conditions()
            .iter()
            .filter(|c| road_ids.contains(c.road_id()) && self.admits_condition(c))
            .cloned()
            .collect();
        let traffic = snapshot
            .traffic()
            .iter()
            .filter(|t| road_ids.contains(t.road_id()) && self.admits_date(t.count_date()))
            .cloned()
            .collect();

        Snapshot::new(roads, conditions, traffic)
    }
}
