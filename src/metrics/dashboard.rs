//! Role-specific dashboard views.
//!
//! Every variant is built from the same shared aggregator; roles differ only
//! in which cards they show. Roles without a dedicated view (analysts) get
//! the admin view.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::metrics::aggregate::NetworkMetrics;
use crate::metrics::breakdown::{
    ConditionShare, RoadClassShare, condition_distribution, road_class_distribution,
};
use crate::model::{Role, SyncStatus};
use crate::snapshot::Snapshot;

/// Number of recent activities shown to an engineer.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// A labelled value on a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub value: String,
}

impl Card {
    fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

/// Common capability of every dashboard view.
pub trait Render {
    fn title(&self) -> &'static str;

    fn cards(&self) -> Vec<Card>;

    /// Plain-text rendering: the title followed by one `title: value` line per card.
    fn render(&self) -> String {
        let mut out = String::from(self.title());
        for card in self.cards() {
            out.push('\n');
            out.push_str(&card.title);
            out.push_str(": ");
            out.push_str(&card.value);
        }
        out
    }
}

fn metric_cards(metrics: &NetworkMetrics) -> Vec<Card> {
    let trend = if metrics.traffic_volume_trend.is_empty() {
        "no counts".to_string()
    } else {
        metrics
            .traffic_volume_trend
            .iter()
            .map(|p| format!("{} {}", p.date, p.volume))
            .collect::<Vec<_>>()
            .join(", ")
    };

    vec![
        Card::new(
            "Total Road Length",
            format!("{:.2} km", metrics.total_road_length),
        ),
        Card::new("% Paved", format!("{:.1}%", metrics.paved_percentage)),
        Card::new("% Unpaved", format!("{:.1}%", metrics.unpaved_percentage)),
        Card::new(
            "Avg Condition Index",
            format!("{:.2}", metrics.average_condition_index),
        ),
        Card::new("Traffic Volume Trend", trend),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminDashboard {
    pub metrics: NetworkMetrics,
}

impl Render for AdminDashboard {
    fn title(&self) -> &'static str {
        "Dashboard"
    }

    fn cards(&self) -> Vec<Card> {
        metric_cards(&self.metrics)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerDashboard {
    pub metrics: NetworkMetrics,
    pub road_classes: Vec<RoadClassShare>,
    pub condition_classes: Vec<ConditionShare>,
    pub assessment_count: usize,
}

impl Render for ViewerDashboard {
    fn title(&self) -> &'static str {
        "Road Network Overview"
    }

    fn cards(&self) -> Vec<Card> {
        let mut cards = metric_cards(&self.metrics);
        cards.push(Card::new(
            "Total Assessments",
            self.assessment_count.to_string(),
        ));
        for share in &self.road_classes {
            cards.push(Card::new(
                format!("{} Roads", share.road_class.label()),
                share.count.to_string(),
            ));
        }
        for share in &self.condition_classes {
            cards.push(Card::new(
                format!("{} Condition", share.class),
                format!("{} ({:.1}%)", share.count, share.share_percent),
            ));
        }
        cards
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityKind {
    Condition,
    Traffic,
}

/// A recent field-capture action by an engineer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub date: DateTime<Utc>,
    pub status: SyncStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineerDashboard {
    pub engineer_id: String,
    pub condition_count: usize,
    pub traffic_count: usize,
    /// The engineer's condition records that are pending or offline.
    pub pending_sync: usize,
    /// Newest first.
    pub recent_activity: Vec<Activity>,
}

impl EngineerDashboard {
    pub fn build(engineer_id: &str, snapshot: &Snapshot) -> Self {
        let mine: Vec<_> = snapshot
            .conditions()
            .iter()
            .filter(|c| c.engineer_id() == engineer_id)
            .collect();
        let my_traffic: Vec<_> = snapshot
            .traffic()
            .iter()
            .filter(|t| t.engineer_id() == engineer_id)
            .collect();

        let pending_sync = mine.iter().filter(|c| !c.sync_status().is_synced()).count();

        let tail = |len: usize| len.saturating_sub(RECENT_ACTIVITY_LIMIT);
        let mut recent_activity = Vec::with_capacity(2 * RECENT_ACTIVITY_LIMIT);
        for c in &mine[tail(mine.len())..] {
            recent_activity.push(Activity {
                kind: ActivityKind::Condition,
                date: c.inspection_date(),
                status: c.sync_status(),
            });
        }
        for t in &my_traffic[tail(my_traffic.len())..] {
            recent_activity.push(Activity {
                kind: ActivityKind::Traffic,
                date: t.count_date(),
                status: SyncStatus::Synced,
            });
        }
        recent_activity.sort_by_key(|a| Reverse(a.date));
        recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

        Self {
            engineer_id: engineer_id.to_string(),
            condition_count: mine.len(),
            traffic_count: my_traffic.len(),
            pending_sync,
            recent_activity,
        }
    }
}

impl Render for EngineerDashboard {
    fn title(&self) -> &'static str {
        "Engineer Dashboard"
    }

    fn cards(&self) -> Vec<Card> {
        let mut cards = vec![
            Card::new("My Assessments", self.condition_count.to_string()),
            Card::new("Traffic Counts", self.traffic_count.to_string()),
            Card::new("Pending Sync", self.pending_sync.to_string()),
        ];
        for activity in &self.recent_activity {
            let kind = match activity.kind {
                ActivityKind::Condition => "Condition",
                ActivityKind::Traffic => "Traffic",
            };
            let when = activity.date.format("%Y-%m-%d %H:%M");
            cards.push(Card::new(
                format!("Recent {kind}"),
                format!("{when} ({})", activity.status),
            ));
        }
        cards
    }
}

/// The dashboard shown to a user, one variant per role view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Dashboard {
    Admin(AdminDashboard),
    Engineer(EngineerDashboard),
    Viewer(ViewerDashboard),
}

impl Dashboard {
    pub fn for_role(role: Role, user_id: &str, snapshot: &Snapshot) -> Self {
        match role {
            Role::Engineer => Self::Engineer(EngineerDashboard::build(user_id, snapshot)),
            Role::Viewer => Self::Viewer(ViewerDashboard {
                metrics: snapshot.metrics(),
                road_classes: road_class_distribution(snapshot.roads()),
                condition_classes: condition_distribution(snapshot.conditions()),
                assessment_count: snapshot.conditions().len(),
            }),
            Role::Admin | Role::Analyst => Self::Admin(AdminDashboard {
                metrics: snapshot.metrics(),
            }),
        }
    }
}

impl Render for Dashboard {
    fn title(&self) -> &'static str {
        match self {
            Self::Admin(d) => d.title(),
            Self::Engineer(d) => d.title(),
            Self::Viewer(d) => d.title(),
        }
    }

    fn cards(&self) -> Vec<Card> {
        match self {
            Self::Admin(d) => d.cards(),
            Self::Engineer(d) => d.cards(),
            Self::Viewer(d) => d.cards(),
        }
    }
}
