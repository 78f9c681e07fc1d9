//! Axis generation.
//!
//! Every axis (GSD, MMAD, particle diameter) is built the same way as the
//! reference workbook tooling did: `arange(min, max + step, step)`.
//!
//! Known quirk: the stop value is `max + step` computed in floating point, and
//! the element count is `ceil((stop - min) / step)`. When `step` divides the
//! range evenly this includes `max` itself; when accumulated rounding nudges
//! the quotient just above an integer, one extra element past `max` appears.
//! Element `i` is `min + i * delta` with `delta = (min + step) - min`, the same
//! float expression `arange` uses, so maps line up with earlier results.

use crate::error::AppError;

/// Upper bound on the number of points in one axis.
pub const MAX_AXIS_LEN: usize = 1_000_000;

/// Validate an axis definition without building it.
pub fn check_range(name: &str, min: f64, max: f64, step: f64) -> Result<(), AppError> {
    if !(min.is_finite() && max.is_finite() && step.is_finite()) {
        return Err(AppError::invalid_range(format!(
            "Invalid {name} range: min={min}, max={max}, step={step} (must be finite)."
        )));
    }
    if step <= 0.0 {
        return Err(AppError::invalid_range(format!(
            "Invalid {name} step: {step} (must be > 0)."
        )));
    }
    if max < min {
        return Err(AppError::invalid_range(format!(
            "Invalid {name} range: max={max} < min={min}."
        )));
    }
    axis_len(name, min, max, step).map(|_| ())
}

/// Number of points `axis` will produce, bounded by `MAX_AXIS_LEN`.
fn axis_len(name: &str, min: f64, max: f64, step: f64) -> Result<usize, AppError> {
    let len = (((max + step) - min) / step).ceil().max(0.0);
    if !len.is_finite() || len > MAX_AXIS_LEN as f64 {
        return Err(AppError::invalid_range(format!(
            "Invalid {name} step: {step} gives {len} points over [{min}, {max}] (limit {MAX_AXIS_LEN})."
        )));
    }
    Ok(len as usize)
}

/// Build `min, min + step, ...` with the inclusive-end convention above.
pub fn axis(name: &str, min: f64, max: f64, step: f64) -> Result<Vec<f64>, AppError> {
    check_range(name, min, max, step)?;

    let len = axis_len(name, min, max, step)?;
    let delta = (min + step) - min;

    Ok((0..len).map(|i| min + i as f64 * delta).collect())
}
