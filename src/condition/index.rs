use crate::error::ValidationError;
use crate::model::SurfaceDefects;

/// Weight of the inverted cracking percentage.
pub const CRACKING_WEIGHT: f64 = 0.30;
/// Weight of the inverted rutting percentage.
pub const RUTTING_WEIGHT: f64 = 0.30;
/// Weight of the inverted pothole percentage.
pub const POTHOLES_WEIGHT: f64 = 0.20;
pub const STRUCTURAL_WEIGHT: f64 = 0.10;
pub const RIDING_QUALITY_WEIGHT: f64 = 0.10;

/// Checks that a percentage or rating lies in `[0, 100]`.
pub fn check_rating(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_nan() {
        return Err(ValidationError::NotANumber { field });
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::OutOfRange { field, value });
    }
    Ok(value)
}

/// Computes the overall condition index (0–100) for an assessment.
///
/// Defect percentages are inverted (`100 - value`) before weighting, while
/// structural condition and riding quality are already quality scores:
///
/// ```text
/// (100 - cracking) * 0.3 + (100 - rutting) * 0.3 + (100 - potholes) * 0.2
///     + structural * 0.1 + riding * 0.1
/// ```
///
/// # Errors
///
/// Returns [`ValidationError`] if any input is NaN or outside `[0, 100]`.
pub fn compute_overall_index(
    defects: &SurfaceDefects,
    structural_condition: f64,
    riding_quality: f64,
) -> Result<f64, ValidationError> {
    let cracking = check_rating("cracking", defects.cracking)?;
    let rutting = check_rating("rutting", defects.rutting)?;
    let potholes = check_rating("potholes", defects.potholes)?;
    let structural = check_rating("structural_condition", structural_condition)?;
    let riding = check_rating("riding_quality", riding_quality)?;

    let index = (100.0 - cracking) * CRACKING_WEIGHT
        + (100.0 - rutting) * RUTTING_WEIGHT
        + (100.0 - potholes) * POTHOLES_WEIGHT
        + structural * STRUCTURAL_WEIGHT
        + riding * RIDING_QUALITY_WEIGHT;

    // Weights sum to 1.0; this only absorbs rounding at the extremes.
    Ok(index.clamp(0.0, 100.0))
}
