//! Bias of the foam model against a reference curve for one grid point.
//!
//! ```text
//! bias = 100 * (Σ w·foam - Σ w·ref) / Σ w·ref
//! ```
//!
//! where `w` are the size-distribution weights. The denominator is the
//! reference sum. A zero or non-finite denominator is an error rather than a
//! NaN in the field, since downstream statistics cannot tell NaN apart from a
//! real value.

use nalgebra::DVector;

use crate::error::AppError;
use crate::math::weighted_sum;

pub fn bias(
    density: &DVector<f64>,
    foam: &DVector<f64>,
    reference: &DVector<f64>,
) -> Result<f64, AppError> {
    let foam_sum = weighted_sum(density, foam)?;
    let ref_sum = weighted_sum(density, reference)?;

    if ref_sum == 0.0 || !ref_sum.is_finite() {
        return Err(AppError::math(format!(
            "Reference-weighted sum is {ref_sum}; bias is undefined."
        )));
    }

    let value = (foam_sum - ref_sum) / ref_sum * 100.0;
    if !value.is_finite() {
        return Err(AppError::math(format!(
            "Non-finite bias (foam sum {foam_sum}, reference sum {ref_sum})."
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn self_comparison_is_zero() {
        let w = DVector::from_vec(vec![0.1, 0.4, 0.3, 0.05]);
        let c = DVector::from_vec(vec![0.9, 0.6, 0.2, 0.01]);
        assert_eq!(bias(&w, &c, &c).unwrap(), 0.0);
    }

    #[test]
    fn known_ratio() {
        let w = DVector::from_vec(vec![1.0, 1.0]);
        let foam = DVector::from_vec(vec![0.6, 0.6]);
        let reference = DVector::from_vec(vec![0.5, 0.5]);
        let b = bias(&w, &foam, &reference).unwrap();
        assert!((b - 20.0).abs() < 1e-9);
    }

    #[test]
    fn zero_reference_sum_is_math_error() {
        let w = DVector::from_vec(vec![1.0, 2.0]);
        let foam = DVector::from_vec(vec![0.5, 0.5]);
        let reference = DVector::from_vec(vec![0.0, 0.0]);
        let err = bias(&w, &foam, &reference).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Math);
    }
}
