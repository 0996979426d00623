//! Network-level aggregation and dashboard views.
//!
//! All functions here are pure: they read the collections they are handed
//! and return fresh values, so they are safe to recompute on every read.

pub mod aggregate;
pub mod breakdown;
pub mod dashboard;
pub mod priority;
pub mod utility;
