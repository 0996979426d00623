//! CLI entry point for the road network rater.
//!
//! Provides subcommands for scoring a single assessment, capturing field
//! records into a snapshot file, and deriving network metrics, role
//! dashboards, maintenance rankings, and filtered reports from it.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use roadnet_rater::condition::capture::{
    ConditionInput, TrafficInput, capture_condition, capture_traffic,
};
use roadnet_rater::condition::grade::{ConditionClass, MaintenancePriority};
use roadnet_rater::filter::ReportFilter;
use roadnet_rater::metrics::breakdown::{road_class_distribution, vehicle_type_distribution};
use roadnet_rater::metrics::dashboard::{Dashboard, Render};
use roadnet_rater::metrics::priority::{PriorityLevel, SortBy, maintenance_priorities};
use roadnet_rater::model::{RoadClass, Role, SurfaceDefects, VehicleCounts};
use roadnet_rater::output::{MetricsRow, append_record, print_json, print_pretty};
use roadnet_rater::snapshot::Snapshot;
use roadnet_rater::{NetworkMetrics, compute_overall_index};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "roadnet_rater")]
#[command(about = "Condition scoring and network metrics for road assets", long_about = None)]
struct Cli {
    /// Snapshot JSON holding roads, conditions, and traffic counts
    #[arg(
        long,
        global = true,
        env = "ROADNET_DATA",
        default_value = "data/network.json"
    )]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one assessment without storing it
    Score {
        /// Cracking (% of surface)
        #[arg(long, allow_negative_numbers = true)]
        cracking: f64,

        /// Rutting (% of surface)
        #[arg(long, allow_negative_numbers = true)]
        rutting: f64,

        /// Potholes (% of surface)
        #[arg(long, allow_negative_numbers = true)]
        potholes: f64,

        /// Structural condition rating (0-100)
        #[arg(long, allow_negative_numbers = true)]
        structural: f64,

        /// Riding quality rating (0-100)
        #[arg(long, allow_negative_numbers = true)]
        riding: f64,
    },
    /// Aggregate the whole network
    Metrics {
        /// CSV file to append a history row to
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Render the dashboard for a role
    Dashboard {
        /// admin, engineer, viewer, or analyst
        #[arg(short, long, default_value = "admin")]
        role: Role,

        /// Signed-in user; selects the engineer's own records
        #[arg(short, long, default_value = "")]
        user_id: String,
    },
    /// Capture a condition assessment and append it to the snapshot
    CaptureCondition {
        #[arg(long)]
        road_id: String,

        #[arg(long, allow_negative_numbers = true)]
        cracking: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        rutting: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        potholes: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        structural: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        riding: Option<f64>,

        /// Photo reference; repeat for several
        #[arg(long = "photo")]
        photos: Vec<String>,

        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,

        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,

        #[arg(long, env = "ROADNET_ENGINEER_ID")]
        engineer_id: String,

        /// Mark the record as captured offline
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
    /// Capture a traffic count and append it to the snapshot
    CaptureTraffic {
        #[arg(long)]
        road_id: String,

        #[arg(long, default_value_t = 0)]
        cars: u32,

        #[arg(long, default_value_t = 0)]
        trucks: u32,

        #[arg(long, default_value_t = 0)]
        buses: u32,

        #[arg(long, default_value_t = 0)]
        motorcycles: u32,

        /// Start of the peak hour (HH:MM:SS)
        #[arg(long)]
        peak_hour: NaiveTime,

        #[arg(long, env = "ROADNET_ENGINEER_ID")]
        engineer_id: String,
    },
    /// Rank roads by maintenance need
    Priority {
        /// all, critical, high, or medium
        #[arg(short, long, default_value = "all")]
        level: PriorityLevel,

        /// condition, traffic, or class
        #[arg(short, long, default_value = "condition")]
        sort_by: SortBy,

        #[arg(long)]
        municipality: Option<String>,

        /// primary, secondary, tertiary, or local
        #[arg(long)]
        road_class: Option<RoadClass>,
    },
    /// Aggregate a filtered part of the network
    Report {
        #[arg(long)]
        municipality: Option<String>,

        /// primary, secondary, tertiary, or local
        #[arg(long)]
        road_class: Option<RoadClass>,

        /// First day included (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day included (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// good, fair, or poor; narrows condition records only
        #[arg(long)]
        condition_class: Option<ConditionClass>,

        /// CSV file to append a history row to
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/roadnet_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("roadnet_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            cracking,
            rutting,
            potholes,
            structural,
            riding,
        } => {
            let defects = SurfaceDefects {
                cracking,
                rutting,
                potholes,
            };
            let index = compute_overall_index(&defects, structural, riding)?;
            info!(
                overall_index = index,
                class = %ConditionClass::from_index(index),
                priority = %MaintenancePriority::from_index(index),
                "Assessment scored"
            );
            println!("{index:.2}");
        }
        Commands::Metrics { history } => {
            let snapshot = Snapshot::load(&cli.data)?;
            let metrics = snapshot.metrics();
            publish_metrics(&snapshot, &metrics, history.as_deref())?;
        }
        Commands::Dashboard { role, user_id } => {
            let snapshot = Snapshot::load(&cli.data)?;
            if role == Role::Engineer && user_id.is_empty() {
                warn!("Engineer dashboard requested without --user-id");
            }
            let dashboard = Dashboard::for_role(role, &user_id, &snapshot);
            print_pretty(&dashboard);
            println!("{}", dashboard.render());
        }
        Commands::CaptureCondition {
            road_id,
            cracking,
            rutting,
            potholes,
            structural,
            riding,
            photos,
            lat,
            lon,
            engineer_id,
            offline,
        } => {
            let input = ConditionInput {
                road_id,
                cracking,
                rutting,
                potholes,
                structural_condition: structural,
                riding_quality: riding,
                photos,
                gps_location: lat.zip(lon),
            };
            record_condition(&cli.data, input, &engineer_id, !offline)?;
        }
        Commands::CaptureTraffic {
            road_id,
            cars,
            trucks,
            buses,
            motorcycles,
            peak_hour,
            engineer_id,
        } => {
            let input = TrafficInput {
                road_id,
                counts: VehicleCounts {
                    cars,
                    trucks,
                    buses,
                    motorcycles,
                },
                peak_hour,
            };
            record_traffic(&cli.data, input, &engineer_id)?;
        }
        Commands::Priority {
            level,
            sort_by,
            municipality,
            road_class,
        } => {
            let filter = ReportFilter {
                municipality,
                road_class,
                ..Default::default()
            };
            let snapshot = filter.apply(&Snapshot::load(&cli.data)?);
            let entries = maintenance_priorities(&snapshot, level, sort_by);

            info!(
                count = entries.len(),
                ?level,
                ?sort_by,
                "Maintenance priorities ranked"
            );

            for entry in &entries {
                info!(
                    road_id = %entry.road_id,
                    road_name = %entry.road_name,
                    municipality = %entry.municipality,
                    road_class = entry.road_class.label(),
                    condition_index = entry.condition_index,
                    priority = %entry.priority,
                    traffic_volume = entry.traffic_volume,
                    "Road"
                );
            }
            print_json(&entries)?;
        }
        Commands::Report {
            municipality,
            road_class,
            from,
            to,
            condition_class,
            history,
        } => {
            let filter = ReportFilter {
                municipality,
                road_class,
                date_from: from,
                date_to: to,
                condition_class,
            };
            let snapshot = filter.apply(&Snapshot::load(&cli.data)?);
            info!(
                roads = snapshot.roads().len(),
                conditions = snapshot.conditions().len(),
                traffic = snapshot.traffic().len(),
                "Report filter applied"
            );
            for share in road_class_distribution(snapshot.roads()) {
                info!(
                    road_class = share.road_class.description(),
                    count = share.count,
                    share_percent = share.share_percent,
                    "Roads by class"
                );
            }
            for share in vehicle_type_distribution(snapshot.traffic()) {
                info!(
                    vehicle_type = share.vehicle_type.label(),
                    count = share.count,
                    share_percent = share.share_percent,
                    "Vehicles by type"
                );
            }
            let metrics = snapshot.metrics();
            publish_metrics(&snapshot, &metrics, history.as_deref())?;
        }
    }

    Ok(())
}

/// Logs the metrics as JSON and optionally appends a row to the history CSV.
#[tracing::instrument(skip(snapshot, metrics))]
fn publish_metrics(
    snapshot: &Snapshot,
    metrics: &NetworkMetrics,
    history: Option<&Path>,
) -> Result<()> {
    info!(
        total_road_length = metrics.total_road_length,
        paved_percentage = metrics.paved_percentage,
        unpaved_percentage = metrics.unpaved_percentage,
        average_condition_index = metrics.average_condition_index,
        trend_points = metrics.traffic_volume_trend.len(),
        "Network metrics computed"
    );
    print_json(metrics)?;

    if let Some(path) = history {
        append_record(path, &MetricsRow::new(snapshot, metrics, Utc::now()))
            .with_context(|| format!("failed to append history to '{}'", path.display()))?;
        info!(path = %path.display(), "History row appended");
    }
    Ok(())
}

/// Validates and scores a condition assessment, then appends it to the snapshot.
#[tracing::instrument(skip(input), fields(road_id = %input.road_id))]
fn record_condition(
    data: &Path,
    input: ConditionInput,
    engineer_id: &str,
    online: bool,
) -> Result<()> {
    let mut snapshot = Snapshot::load_or_default(data)?;
    if snapshot.road(&input.road_id).is_none() {
        warn!("Road is not in the inventory");
    }

    let record = capture_condition(input, engineer_id, online, Utc::now())?;
    let index = record.overall_index();
    let id = record.id().to_string();
    snapshot.add_condition(record);
    snapshot.save(data)?;

    info!(
        id = %id,
        overall_index = index,
        class = %ConditionClass::from_index(index),
        online,
        "Condition saved"
    );
    if !online {
        info!("Condition saved offline, will sync when online");
    }
    Ok(())
}

/// Builds a traffic count from the entered vehicle counts and appends it to the snapshot.
#[tracing::instrument(skip(input), fields(road_id = %input.road_id))]
fn record_traffic(data: &Path, input: TrafficInput, engineer_id: &str) -> Result<()> {
    let mut snapshot = Snapshot::load_or_default(data)?;
    if snapshot.road(&input.road_id).is_none() {
        warn!("Road is not in the inventory");
    }

    let count = capture_traffic(input, engineer_id, Utc::now())?;
    info!(
        id = count.id(),
        total_volume = count.total_volume(),
        "Traffic count saved"
    );
    snapshot.add_traffic(count);
    snapshot.save(data)?;
    Ok(())
}
