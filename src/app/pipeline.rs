//! Shared bias-map pipeline used by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> grids -> penetration curves -> field -> statistics
//!
//! Front-ends then only decide how to present or persist the result.

use log::{info, warn};

use crate::bias::compute_field;
use crate::domain::{BiasField, RunParameters};
use crate::error::{AppError, ErrorKind};
use crate::grid::{ParameterGrid, diameter_axis};
use crate::models::PenetrationCurves;
use crate::report::{SummaryStats, summarize};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub params: RunParameters,
    pub grid: ParameterGrid,
    pub curves: PenetrationCurves,
    pub field: BiasField,
    pub clipped: usize,
    /// `None` when every cell is masked.
    pub stats: Option<SummaryStats>,
}

/// Resolve the diameter list for a run.
///
/// With `set_dp` the list is generated from the `dp_*` bounds; otherwise it
/// must be supplied (e.g. loaded from a file).
pub fn resolve_diameters(params: &RunParameters, supplied: Option<Vec<f64>>) -> Result<Vec<f64>, AppError> {
    let diameters = match (params.set_dp, supplied) {
        (true, _) => diameter_axis(params)?,
        (false, Some(list)) => list,
        (false, None) => {
            return Err(AppError::configuration(
                "set_dp is false but no diameter list was supplied.",
            ));
        }
    };

    if diameters.is_empty() {
        return Err(AppError::domain("Diameter list is empty."));
    }
    if let Some(bad) = diameters.iter().find(|d| !(d.is_finite() && **d > 0.0)) {
        return Err(AppError::domain(format!("Diameters must be > 0, got {bad}.")));
    }
    Ok(diameters)
}

/// Execute the full pipeline.
pub fn run_bias_map(params: &RunParameters, supplied: Option<Vec<f64>>) -> Result<RunOutput, AppError> {
    // 1) Fail fast on anything checkable before the per-cell loop.
    params.validate()?;
    let diameters = resolve_diameters(params, supplied)?;

    // 2) Grids.
    let grid = ParameterGrid::from_params(params)?;
    let (n_gsd, n_mmad) = grid.shape();
    info!(
        "bias map: {n_gsd} gsd x {n_mmad} mmad over {} diameters ({} vs {})",
        diameters.len(),
        params.data_set,
        params.compare
    );

    // 3) Curves are shared by every grid point.
    let curves = PenetrationCurves::evaluate(&diameters, params.data_set)?;

    // 4) Field.
    let outcome = compute_field(&grid, &curves, params)?;
    if outcome.clipped > 0 {
        info!("{} cells clipped to max_value={}", outcome.clipped, params.max_value);
    }

    // 5) Statistics.
    let stats = match summarize(&outcome.field) {
        Ok(s) => Some(s),
        Err(e) if e.kind() == ErrorKind::Undefined => {
            warn!("{e}");
            None
        }
        Err(e) => return Err(e),
    };

    Ok(RunOutput {
        params: params.clone(),
        grid,
        curves,
        field: outcome.field,
        clipped: outcome.clipped,
        stats,
    })
}
