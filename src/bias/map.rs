//! Bias evaluation over the full GSD x MMAD grid.
//!
//! Each cell is independent, so rows are evaluated in parallel and collected
//! back in grid order. Per cell:
//!
//! 1. density weights for `(gsd, mmad)` over the diameter list
//! 2. bias of the foam curve against the selected reference curve
//! 3. clip to `max_value`
//! 4. mask when outside the region of interest (if enabled)
//!
//! Any cell error aborts the whole map.

use log::debug;
use rayon::prelude::*;

use crate::bias::{bias, filter_cell};
use crate::domain::{BiasCell, BiasField, RunParameters};
use crate::error::AppError;
use crate::grid::ParameterGrid;
use crate::models::{PenetrationCurves, density_weights};

/// Computed field plus bookkeeping from the map pass.
#[derive(Debug, Clone)]
pub struct MapOutcome {
    pub field: BiasField,
    /// Cells whose bias reached `max_value` and was stored as the ceiling.
    pub clipped: usize,
}

/// Clamp a bias to the display ceiling.
pub fn clip(value: f64, max_value: f64) -> f64 {
    if value >= max_value { max_value } else { value }
}

pub fn compute_field(
    grid: &ParameterGrid,
    curves: &PenetrationCurves,
    params: &RunParameters,
) -> Result<MapOutcome, AppError> {
    let reference = curves.compare_curve(params.compare);

    let rows: Vec<(Vec<BiasCell>, usize)> = grid
        .gsd
        .par_iter()
        .enumerate()
        .map(|(i, &gsd)| -> Result<(Vec<BiasCell>, usize), AppError> {
            let mut row = Vec::with_capacity(grid.mmad.len());
            let mut clipped = 0;
            for &mmad in &grid.mmad {
                let weights = density_weights(&curves.diameters, gsd, mmad, params.density)?;
                let raw = bias(&weights, &curves.foam, reference).map_err(|e| {
                    AppError::math(format!("At gsd={gsd}, mmad={mmad}: {e}"))
                })?;

                let value = clip(raw, params.max_value);
                if value != raw {
                    clipped += 1;
                }

                let mut cell = BiasCell::Value(value);
                if params.area_of_interest {
                    cell = filter_cell(params.compare, gsd, mmad, cell);
                }
                row.push(cell);
            }
            debug!("row {i} (gsd={gsd:.3}) done, {clipped} clipped");
            Ok((row, clipped))
        })
        .collect::<Result<_, _>>()?;

    let clipped: usize = rows.iter().map(|(_, c)| c).sum();
    let field = BiasField::from_rows(rows.into_iter().map(|(r, _)| r).collect())?;

    Ok(MapOutcome { field, clipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Compare, DataSet};
    use crate::grid::diameter_axis;

    fn small_params() -> RunParameters {
        RunParameters {
            gsd_min: 1.75,
            gsd_max: 2.25,
            gsd_step: 0.25,
            mmad_min: 1.0,
            mmad_max: 10.0,
            mmad_step: 1.5,
            area_of_interest: false,
            ..RunParameters::default()
        }
    }

    #[test]
    fn clip_caps_at_ceiling_only() {
        assert_eq!(clip(512.0, 400.0), 400.0);
        assert_eq!(clip(400.0, 400.0), 400.0);
        assert_eq!(clip(-35.0, 400.0), -35.0);
        assert_eq!(clip(399.9, 400.0), 399.9);
    }

    #[test]
    fn field_matches_grid_shape() {
        let params = small_params();
        let grid = ParameterGrid::from_params(&params).unwrap();
        let dps = diameter_axis(&params).unwrap();
        let curves = PenetrationCurves::evaluate(&dps, params.data_set).unwrap();
        let out = compute_field(&grid, &curves, &params).unwrap();
        assert_eq!(out.field.n_gsd(), grid.gsd.len());
        assert_eq!(out.field.n_mmad(), grid.mmad.len());
        assert_eq!(out.field.masked_count(), 0);
    }

    #[test]
    fn cells_match_serial_evaluation() {
        let params = small_params();
        let grid = ParameterGrid::from_params(&params).unwrap();
        let dps = diameter_axis(&params).unwrap();
        let curves = PenetrationCurves::evaluate(&dps, params.data_set).unwrap();
        let out = compute_field(&grid, &curves, &params).unwrap();

        for (i, &gsd) in grid.gsd.iter().enumerate() {
            for (j, &mmad) in grid.mmad.iter().enumerate() {
                let w = density_weights(&dps, gsd, mmad, params.density).unwrap();
                let b = clip(
                    bias(&w, &curves.foam, curves.compare_curve(params.compare)).unwrap(),
                    params.max_value,
                );
                assert_eq!(out.field.get(i, j), Some(BiasCell::Value(b)));
            }
        }
    }

    #[test]
    fn region_masking_follows_predicate() {
        let params = RunParameters {
            area_of_interest: true,
            compare: Compare::Inhalable,
            data_set: DataSet::Original,
            ..small_params()
        };
        let grid = ParameterGrid::from_params(&params).unwrap();
        let dps = diameter_axis(&params).unwrap();
        let curves = PenetrationCurves::evaluate(&dps, params.data_set).unwrap();
        let out = compute_field(&grid, &curves, &params).unwrap();

        for (i, &gsd) in grid.gsd.iter().enumerate() {
            for (j, &mmad) in grid.mmad.iter().enumerate() {
                let masked = out.field.get(i, j).unwrap().is_masked();
                assert_eq!(masked, !crate::bias::in_region(params.compare, gsd, mmad));
            }
        }
    }

    #[test]
    fn low_ceiling_clips_every_large_bias() {
        let params = RunParameters {
            max_value: -1000.0,
            ..small_params()
        };
        let grid = ParameterGrid::from_params(&params).unwrap();
        let dps = diameter_axis(&params).unwrap();
        let curves = PenetrationCurves::evaluate(&dps, params.data_set).unwrap();
        let out = compute_field(&grid, &curves, &params).unwrap();
        assert_eq!(out.clipped, out.field.cell_count());
        assert!(out.field.cells().all(|c| c == BiasCell::Value(-1000.0)));
    }
}
