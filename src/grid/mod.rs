//! Parameter grids for the bias map.
//!
//! Responsibilities:
//!
//! - build the GSD, MMAD and diameter axes (`axis`)
//! - hold the GSD x MMAD Cartesian grid and its mesh (`ParameterGrid`)

pub mod axis;

pub use axis::*;

use crate::domain::RunParameters;
use crate::error::AppError;

/// GSD and MMAD axes of a run. Rows of the field follow `gsd`, columns `mmad`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    pub gsd: Vec<f64>,
    pub mmad: Vec<f64>,
}

impl ParameterGrid {
    pub fn from_params(params: &RunParameters) -> Result<Self, AppError> {
        Ok(Self {
            gsd: axis("gsd", params.gsd_min, params.gsd_max, params.gsd_step)?,
            mmad: axis("mmad", params.mmad_min, params.mmad_max, params.mmad_step)?,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.gsd.len(), self.mmad.len())
    }

    /// Meshgrid in plotting orientation: `x[i][j] = mmad[j]`, `y[i][j] = gsd[i]`.
    pub fn mesh(&self) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let x = self.gsd.iter().map(|_| self.mmad.clone()).collect();
        let y = self
            .gsd
            .iter()
            .map(|&g| vec![g; self.mmad.len()])
            .collect();
        (x, y)
    }
}

/// Diameter list generated from the `dp_*` parameters.
pub fn diameter_axis(params: &RunParameters) -> Result<Vec<f64>, AppError> {
    axis("dp", params.dp_min, params.dp_max, params.dp_step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_matches_axes() {
        let grid = ParameterGrid {
            gsd: vec![2.0, 3.0],
            mmad: vec![1.0, 5.0, 9.0],
        };
        let (x, y) = grid.mesh();
        assert_eq!(x.len(), 2);
        assert_eq!(x[1], vec![1.0, 5.0, 9.0]);
        assert_eq!(y[1], vec![3.0, 3.0, 3.0]);
    }

    #[test]
    fn default_params_grid_shape() {
        let grid = ParameterGrid::from_params(&RunParameters::default()).unwrap();
        let (n_gsd, n_mmad) = grid.shape();
        assert_eq!(n_gsd, 46);
        assert_eq!(n_mmad, 60);
    }
}
