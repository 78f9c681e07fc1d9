//! Input loading: parameter files and diameter lists.
//!
//! - parameter file: JSON object with any subset of `RunParameters` fields;
//!   missing fields take the usual defaults
//! - diameter list: CSV whose first column holds diameters in µm; a
//!   non-numeric first row is treated as a header

use std::fs::File;
use std::path::Path;

use crate::domain::RunParameters;
use crate::error::AppError;

/// Load run parameters from a JSON file.
pub fn read_params_json(path: &Path) -> Result<RunParameters, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open parameter file '{}': {e}", path.display())))?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::configuration(format!("Invalid parameter file '{}': {e}", path.display())))
}

/// Load a diameter list from a CSV file.
pub fn read_diameters_csv(path: &Path) -> Result<Vec<f64>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open diameter file '{}': {e}", path.display())))?;
    parse_diameters(file)
}

/// Parse diameters from any CSV reader.
pub fn parse_diameters<R: std::io::Read>(reader: R) -> Result<Vec<f64>, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| AppError::io(format!("Diameter CSV row {}: {e}", i + 1)))?;
        let Some(field) = record.get(0).filter(|f| !f.is_empty()) else {
            continue;
        };
        match field.parse::<f64>() {
            Ok(d) => {
                if !(d.is_finite() && d > 0.0) {
                    return Err(AppError::domain(format!(
                        "Diameter CSV row {}: diameter must be > 0, got {d}.",
                        i + 1
                    )));
                }
                out.push(d);
            }
            Err(_) if i == 0 => continue,
            Err(e) => {
                return Err(AppError::io(format!(
                    "Diameter CSV row {}: invalid number '{field}' ({e}).",
                    i + 1
                )));
            }
        }
    }

    if out.is_empty() {
        return Err(AppError::domain("Diameter CSV contains no diameters."));
    }
    Ok(out)
}
