//! Penetration curves as functions of particle diameter.
//!
//! - foam model: product of two log-normal upper tails (two-stage capture)
//! - inhalable convention: `50 (1 + exp(-0.06 d)) / 100`
//! - respirable convention: log-normal upper tail with median 4.25 µm, GSD 1.5
//!
//! All values lie in `[0, 1]`.

use nalgebra::DVector;
use statrs::distribution::Normal;

use crate::domain::{Compare, DataSet, FoamParams};
use crate::error::AppError;
use crate::math::{ln_diameter, log_scale_normal, log_scale_sf};

/// Median cut of the respirable convention (µm).
pub const RESPIRABLE_MEDIAN: f64 = 4.25;
/// Geometric spread of the respirable convention.
pub const RESPIRABLE_GSD: f64 = 1.5;

/// Foam penetration at diameter `d` for the given two-stage parameters.
pub fn foam_penetration(d: f64, params: &FoamParams) -> Result<f64, AppError> {
    let stage_a = log_scale_normal(params.dma, params.sda)?;
    let stage_b = log_scale_normal(params.dmb, params.sdb)?;
    foam_with(&stage_a, &stage_b, d)
}

/// Inhalable fraction of the total aerosol at diameter `d`.
pub fn inhalable_fraction(d: f64) -> Result<f64, AppError> {
    ln_diameter(d)?;
    Ok(50.0 * (1.0 + (-0.06 * d).exp()) / 100.0)
}

/// Respirable fraction expressed relative to the inhalable aerosol.
pub fn respirable_of_inhalable(d: f64) -> Result<f64, AppError> {
    let dist = respirable_dist()?;
    log_scale_sf(&dist, d)
}

/// Respirable fraction expressed relative to the total aerosol.
pub fn respirable_of_total(d: f64) -> Result<f64, AppError> {
    Ok(inhalable_fraction(d)? * respirable_of_inhalable(d)?)
}

fn respirable_dist() -> Result<Normal, AppError> {
    log_scale_normal(RESPIRABLE_MEDIAN, RESPIRABLE_GSD)
}

fn foam_with(stage_a: &Normal, stage_b: &Normal, d: f64) -> Result<f64, AppError> {
    Ok(log_scale_sf(stage_a, d)? * log_scale_sf(stage_b, d)?)
}

/// All penetration curves sampled on one diameter list.
///
/// Computed once per run and shared read-only by every grid point.
#[derive(Debug, Clone)]
pub struct PenetrationCurves {
    pub diameters: Vec<f64>,
    pub foam: DVector<f64>,
    pub inhalable: DVector<f64>,
    pub respirable_of_inhalable: DVector<f64>,
    pub respirable_of_total: DVector<f64>,
}

impl PenetrationCurves {
    pub fn evaluate(diameters: &[f64], data_set: DataSet) -> Result<Self, AppError> {
        if diameters.is_empty() {
            return Err(AppError::domain("Diameter list is empty."));
        }

        let params = data_set.foam_params();
        let stage_a = log_scale_normal(params.dma, params.sda)?;
        let stage_b = log_scale_normal(params.dmb, params.sdb)?;
        let respirable = respirable_dist()?;

        let n = diameters.len();
        let mut foam = Vec::with_capacity(n);
        let mut inhalable = Vec::with_capacity(n);
        let mut resp_inh = Vec::with_capacity(n);
        let mut resp_tot = Vec::with_capacity(n);

        for &d in diameters {
            let inh = inhalable_fraction(d)?;
            let r = log_scale_sf(&respirable, d)?;
            foam.push(foam_with(&stage_a, &stage_b, d)?);
            inhalable.push(inh);
            resp_inh.push(r);
            resp_tot.push(inh * r);
        }

        Ok(Self {
            diameters: diameters.to_vec(),
            foam: DVector::from_vec(foam),
            inhalable: DVector::from_vec(inhalable),
            respirable_of_inhalable: DVector::from_vec(resp_inh),
            respirable_of_total: DVector::from_vec(resp_tot),
        })
    }

    /// Reference curve the foam model is compared against.
    pub fn compare_curve(&self, compare: Compare) -> &DVector<f64> {
        match compare {
            Compare::Inhalable => &self.respirable_of_inhalable,
            Compare::Total => &self.respirable_of_total,
        }
    }
}
