//! Discrete weighted sums over the diameter list.
//!
//! The bias integrals are approximated as plain sums `Σ w_i * c_i` over the
//! sampled diameters, with no bin-width factor. Both sides of every ratio use
//! the same diameters so the missing factor cancels for evenly spaced lists.

use nalgebra::DVector;

use crate::error::AppError;

/// `Σ weights_i * curve_i`.
pub fn weighted_sum(weights: &DVector<f64>, curve: &DVector<f64>) -> Result<f64, AppError> {
    if weights.len() != curve.len() {
        return Err(AppError::math(format!(
            "Length mismatch in weighted sum: {} weights vs {} curve points.",
            weights.len(),
            curve.len()
        )));
    }
    Ok(weights.dot(curve))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_of_simple_vectors() {
        let w = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let c = DVector::from_vec(vec![0.5, 0.5, 1.0]);
        let s = weighted_sum(&w, &c).unwrap();
        assert!((s - 4.5).abs() < 1e-12);
    }

    #[test]
    fn mismatched_lengths_fail() {
        let w = DVector::from_vec(vec![1.0, 2.0]);
        let c = DVector::from_vec(vec![0.5]);
        assert!(weighted_sum(&w, &c).is_err());
    }
}
