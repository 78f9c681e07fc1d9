//! Normal distribution helpers on a log-diameter scale.
//!
//! Every curve in this crate evaluates a normal distribution at `ln(d)` whose
//! location and scale are themselves natural logs of physical parameters:
//!
//! ```text
//! Φ(ln d; ln median, ln spread)
//! ```
//!
//! The scale is `ln(spread)`, not `spread`; fitted curve parameters were
//! produced under that convention and must be evaluated the same way.

use statrs::distribution::{Continuous, ContinuousCDF, Normal};

use crate::error::AppError;

/// Build `N(ln median, ln spread)`.
pub fn log_scale_normal(median: f64, spread: f64) -> Result<Normal, AppError> {
    if !(median.is_finite() && median > 0.0) {
        return Err(AppError::domain(format!("Median must be > 0, got {median}.")));
    }
    if !(spread.is_finite() && spread > 1.0) {
        return Err(AppError::domain(format!(
            "Geometric spread must be > 1 so ln(spread) > 0, got {spread}."
        )));
    }
    Normal::new(median.ln(), spread.ln())
        .map_err(|e| AppError::domain(format!("Invalid normal parameters: {e}.")))
}

/// `ln(d)`, rejecting diameters outside the logarithm's domain.
pub fn ln_diameter(d: f64) -> Result<f64, AppError> {
    if !(d.is_finite() && d > 0.0) {
        return Err(AppError::domain(format!("Diameter must be > 0, got {d}.")));
    }
    Ok(d.ln())
}

/// Upper tail `1 - Φ(ln d)` of a log-scale normal.
pub fn log_scale_sf(dist: &Normal, d: f64) -> Result<f64, AppError> {
    Ok(1.0 - dist.cdf(ln_diameter(d)?))
}

/// Density `φ(ln d)` of a log-scale normal.
pub fn log_scale_pdf(dist: &Normal, d: f64) -> Result<f64, AppError> {
    Ok(dist.pdf(ln_diameter(d)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sf_is_half_at_median() {
        let dist = log_scale_normal(4.25, 1.5).unwrap();
        let v = log_scale_sf(&dist, 4.25).unwrap();
        assert!((v - 0.5).abs() < 1e-12, "expected 0.5, got {v}");
    }

    #[test]
    fn pdf_peak_matches_closed_form() {
        let dist = log_scale_normal(7.0, 1.75).unwrap();
        let v = log_scale_pdf(&dist, 7.0).unwrap();
        let expected = 1.0 / ((2.0 * std::f64::consts::PI).sqrt() * 1.75_f64.ln());
        assert!((v - expected).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_diameter() {
        assert!(ln_diameter(0.0).is_err());
        assert!(ln_diameter(-1.0).is_err());
        assert!(ln_diameter(f64::NAN).is_err());
    }

    #[test]
    fn rejects_spread_at_or_below_one() {
        assert!(log_scale_normal(5.0, 1.0).is_err());
        assert!(log_scale_normal(5.0, 0.5).is_err());
        assert!(log_scale_normal(0.0, 2.0).is_err());
    }
}
