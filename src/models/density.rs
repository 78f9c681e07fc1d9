//! Size-distribution density over the diameter list.
//!
//! For an aerosol with geometric standard deviation `gsd` and mass median
//! aerodynamic diameter `mmad` the weight at diameter `d` is the normal density
//! of `ln d` with mean `ln mmad` and scale `ln gsd`. There is no `1/d`
//! Jacobian; the weights are used as-is by the bias sums.

use nalgebra::DVector;

use crate::domain::DensityMethod;
use crate::error::AppError;
use crate::math::{ln_diameter, log_scale_normal, log_scale_pdf};

/// `sqrt(2π)` as truncated in the reference workbook.
const SPREADSHEET_TWO_PI: f64 = 6.28318;

/// Log-normal density at a single diameter.
pub fn log_normal_density(d: f64, gsd: f64, mmad: f64) -> Result<f64, AppError> {
    let dist = log_scale_normal(mmad, gsd)?;
    log_scale_pdf(&dist, d)
}

/// Workbook form of the same density, kept for cross-checking old results.
pub fn spreadsheet_density(d: f64, gsd: f64, mmad: f64) -> Result<f64, AppError> {
    // Shares the parameter checks of the exact form.
    log_scale_normal(mmad, gsd)?;
    ln_diameter(d)?;
    let ln_gsd = gsd.ln();
    let z = (d / mmad).ln() / ln_gsd;
    Ok((-0.5 * z * z).exp() / (SPREADSHEET_TWO_PI.sqrt() * ln_gsd))
}

/// Density weights over a diameter list for one grid point.
pub fn density_weights(
    diameters: &[f64],
    gsd: f64,
    mmad: f64,
    method: DensityMethod,
) -> Result<DVector<f64>, AppError> {
    let values = match method {
        DensityMethod::Normal => {
            let dist = log_scale_normal(mmad, gsd)?;
            diameters
                .iter()
                .map(|&d| log_scale_pdf(&dist, d))
                .collect::<Result<Vec<_>, _>>()?
        }
        DensityMethod::Spreadsheet => diameters
            .iter()
            .map(|&d| spreadsheet_density(d, gsd, mmad))
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(DVector::from_vec(values))
}
