//! Condition scoring for field assessments.
//!
//! `index` combines surface defects and quality ratings into a single
//! 0–100 overall index, `grade` maps that index onto the Good/Fair/Poor
//! classes and maintenance priority bands, and `capture` turns raw form
//! input into validated, immutable records.

pub mod capture;
pub mod grade;
pub mod index;
