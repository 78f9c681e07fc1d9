//! Reporting utilities: summary statistics over a bias field.
//!
//! Statistics skip masked cells entirely. A field with no unmasked cells has
//! no defined statistics; that is reported as an `Undefined` error instead of
//! a division by zero.

pub mod format;

pub use format::*;

use serde::Serialize;

use crate::domain::BiasField;
use crate::error::AppError;

/// Bias tolerance (percent) used for the "within" share.
pub const WITHIN_TOLERANCE: f64 = 10.0;

/// Summary of one bias field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub average_abs_bias: f64,
    pub percent_within_10: f64,
    /// Unmasked cells the statistics were computed over.
    pub cells: usize,
    pub masked: usize,
}

/// Mean of `|bias|` over unmasked cells.
pub fn average_abs_bias(field: &BiasField) -> Result<f64, AppError> {
    let values: Vec<f64> = field.cells().filter_map(|c| c.value()).collect();
    if values.is_empty() {
        return Err(all_masked());
    }
    let total: f64 = values.iter().map(|b| b.abs()).sum();
    Ok(total / values.len() as f64)
}

/// Percentage of unmasked cells with `|bias| <= 10`.
pub fn percent_within_10(field: &BiasField) -> Result<f64, AppError> {
    let mut count = 0usize;
    let mut within = 0usize;
    for b in field.cells().filter_map(|c| c.value()) {
        count += 1;
        if b.abs() <= WITHIN_TOLERANCE {
            within += 1;
        }
    }
    if count == 0 {
        return Err(all_masked());
    }
    Ok(within as f64 / count as f64 * 100.0)
}

pub fn summarize(field: &BiasField) -> Result<SummaryStats, AppError> {
    let masked = field.masked_count();
    Ok(SummaryStats {
        average_abs_bias: average_abs_bias(field)?,
        percent_within_10: percent_within_10(field)?,
        cells: field.cell_count() - masked,
        masked,
    })
}

fn all_masked() -> AppError {
    AppError::undefined("Every cell is masked; bias statistics are undefined.")
}
