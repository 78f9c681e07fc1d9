//! Export the penetration curves to CSV.
//!
//! One row per diameter, meant for spreadsheets or for plotting the curves
//! against each other outside this tool.

use std::path::Path;

use crate::error::AppError;
use crate::models::PenetrationCurves;

pub const CURVES_HEADER: [&str; 5] = [
    "dp_um",
    "foam",
    "inhalable",
    "respirable_of_inhalable",
    "respirable_of_total",
];

/// Write the curves table to any writer.
pub fn write_curves<W: std::io::Write>(writer: W, curves: &PenetrationCurves) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CURVES_HEADER)
        .map_err(|e| AppError::io(format!("Failed to write curves CSV header: {e}")))?;

    for (i, d) in curves.diameters.iter().enumerate() {
        wtr.write_record([
            d.to_string(),
            format!("{:.10}", curves.foam[i]),
            format!("{:.10}", curves.inhalable[i]),
            format!("{:.10}", curves.respirable_of_inhalable[i]),
            format!("{:.10}", curves.respirable_of_total[i]),
        ])
        .map_err(|e| AppError::io(format!("Failed to write curves CSV row: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::io(format!("Failed to flush curves CSV: {e}")))?;
    Ok(())
}

/// Write the curves table to a file.
pub fn write_curves_csv(path: &Path, curves: &PenetrationCurves) -> Result<(), AppError> {
    let file = std::fs::File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create curves CSV '{}': {e}", path.display())))?;
    write_curves(file, curves)
}
