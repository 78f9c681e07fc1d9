//! JSON view of a bias field for external contour/heatmap renderers.
//!
//! The view carries everything a renderer needs and nothing it must compute:
//! - axis bounds used for the plot extent (`0..mmad_max`, `gsd_min..gsd_max`)
//! - the GSD/MMAD axes and their meshgrid
//! - the field itself, with masked cells as `null`

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::pipeline::RunOutput;
use crate::domain::RunParameters;
use crate::error::AppError;
use crate::report::SummaryStats;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub mmad_max: f64,
    pub gsd_min: f64,
    pub gsd_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldView {
    pub tool: String,
    pub params: RunParameters,
    pub axes: AxisBounds,
    pub gsd: Vec<f64>,
    pub mmad: Vec<f64>,
    pub mesh_x: Vec<Vec<f64>>,
    pub mesh_y: Vec<Vec<f64>>,
    /// `[gsd_index][mmad_index]`, `null` where masked.
    pub field: Vec<Vec<Option<f64>>>,
    pub stats: Option<ViewStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewStats {
    pub average_abs_bias: f64,
    pub percent_within_10: f64,
}

impl From<SummaryStats> for ViewStats {
    fn from(s: SummaryStats) -> Self {
        Self {
            average_abs_bias: s.average_abs_bias,
            percent_within_10: s.percent_within_10,
        }
    }
}

impl FieldView {
    pub fn from_run(run: &RunOutput) -> Self {
        let (mesh_x, mesh_y) = run.grid.mesh();
        Self {
            tool: "biasmap".to_string(),
            params: run.params.clone(),
            axes: AxisBounds {
                mmad_max: run.params.mmad_max,
                gsd_min: run.params.gsd_min,
                gsd_max: run.params.gsd_max,
            },
            gsd: run.grid.gsd.clone(),
            mmad: run.grid.mmad.clone(),
            mesh_x,
            mesh_y,
            field: run.field.to_options(),
            stats: run.stats.map(ViewStats::from),
        }
    }
}

/// Write the JSON view of a run.
pub fn write_field_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create field JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, &FieldView::from_run(run))
        .map_err(|e| AppError::io(format!("Failed to write field JSON: {e}")))?;
    Ok(())
}

/// Read a JSON view back.
pub fn read_field_json(path: &Path) -> Result<FieldView, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open field JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::io(format!("Invalid field JSON: {e}")))
}
