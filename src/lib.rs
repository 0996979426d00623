pub mod condition;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod model;
pub mod output;
pub mod snapshot;

pub use condition::index::compute_overall_index;
pub use error::ValidationError;
pub use metrics::aggregate::{NetworkMetrics, compute_network_metrics};
