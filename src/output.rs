//! Output formatting and persistence for network metrics.
//!
//! Supports pretty-printing, JSON serialization, and CSV append of metric
//! history rows.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{debug, info};

use crate::metrics::aggregate::NetworkMetrics;
use crate::snapshot::Snapshot;

/// One row of the metrics history CSV.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsRow {
    pub timestamp: DateTime<Utc>,
    pub roads: usize,
    pub conditions: usize,
    pub traffic_counts: usize,
    pub total_road_length: f64,
    pub paved_percentage: f64,
    pub unpaved_percentage: f64,
    pub average_condition_index: f64,
    pub latest_volume: Option<u64>,
}

impl MetricsRow {
    pub fn new(snapshot: &Snapshot, metrics: &NetworkMetrics, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            roads: snapshot.roads().len(),
            conditions: snapshot.conditions().len(),
            traffic_counts: snapshot.traffic().len(),
            total_road_length: metrics.total_road_length,
            paved_percentage: metrics.paved_percentage,
            unpaved_percentage: metrics.unpaved_percentage,
            average_condition_index: metrics.average_condition_index,
            latest_volume: metrics.traffic_volume_trend.last().map(|p| p.volume),
        }
    }
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl std::fmt::Debug) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Appends a [`MetricsRow`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &Path, row: &MetricsRow) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(row)?;
    writer.flush()?;

    Ok(())
}
