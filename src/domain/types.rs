//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - supplied by a front-end (CLI flags or a JSON parameter file)
//! - used in-memory during the bias-map computation
//! - written back out alongside the computed field

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which fitted foam penetration curve to use as the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DataSet {
    /// Parameters from the first curve fit.
    Original,
    /// Parameters after re-optimising the fit against measured foam data.
    Optimised,
}

impl DataSet {
    pub fn name(self) -> &'static str {
        match self {
            DataSet::Original => "original",
            DataSet::Optimised => "optimised",
        }
    }

    /// Penetration parameters for the two log-normal stages of this curve.
    pub fn foam_params(self) -> FoamParams {
        match self {
            DataSet::Original => FoamParams {
                dma: 7.30,
                dmb: 5.57,
                sda: 2.02,
                sdb: 1.28,
            },
            DataSet::Optimised => FoamParams {
                dma: 4.57,
                dmb: 5.37,
                sda: 1.24,
                sdb: 1.76,
            },
        }
    }
}

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataSet {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "original" => Ok(DataSet::Original),
            "optimised" => Ok(DataSet::Optimised),
            other => Err(AppError::configuration(format!(
                "data_set should be original or optimised, got '{other}'."
            ))),
        }
    }
}

/// What the respirable reference fraction is expressed relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Compare {
    /// Respirable as a fraction of the inhalable aerosol.
    #[serde(alias = "inhalible")]
    #[value(alias = "inhalible")]
    Inhalable,
    /// Respirable as a fraction of the total aerosol.
    Total,
}

impl Compare {
    pub fn name(self) -> &'static str {
        match self {
            Compare::Inhalable => "inhalable",
            Compare::Total => "total",
        }
    }
}

impl fmt::Display for Compare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Compare {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "inhalable" | "inhalible" => Ok(Compare::Inhalable),
            "total" => Ok(Compare::Total),
            other => Err(AppError::configuration(format!(
                "compare should be inhalable or total, got '{other}'."
            ))),
        }
    }
}

/// How the size-distribution density is evaluated at each diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DensityMethod {
    /// Normal PDF of `ln(d)` with mean `ln(mmad)` and scale `ln(gsd)`.
    #[default]
    Normal,
    /// Closed form used in the reference workbook (`sqrt(6.28318)` for `sqrt(2π)`).
    Spreadsheet,
}

impl DensityMethod {
    pub fn name(self) -> &'static str {
        match self {
            DensityMethod::Normal => "normal",
            DensityMethod::Spreadsheet => "spreadsheet",
        }
    }
}

impl FromStr for DensityMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "normal" => Ok(DensityMethod::Normal),
            "spreadsheet" => Ok(DensityMethod::Spreadsheet),
            other => Err(AppError::configuration(format!(
                "density should be normal or spreadsheet, got '{other}'."
            ))),
        }
    }
}

/// Parameters of a two-stage foam penetration curve.
///
/// `dma`/`dmb` are the median cut diameters (µm) and `sda`/`sdb` the geometric
/// spreads of the two stages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoamParams {
    pub dma: f64,
    pub dmb: f64,
    pub sda: f64,
    pub sdb: f64,
}

/// All inputs for a single bias-map run.
///
/// Defaults match the values the original input form was pre-filled with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParameters {
    pub gsd_min: f64,
    pub gsd_max: f64,
    pub gsd_step: f64,
    pub mmad_min: f64,
    pub mmad_max: f64,
    pub mmad_step: f64,
    pub dp_min: f64,
    pub dp_max: f64,
    pub dp_step: f64,
    pub data_set: DataSet,
    pub compare: Compare,
    /// Generate the diameter list from `dp_*` (true) or load it from a file (false).
    pub set_dp: bool,
    pub area_of_interest: bool,
    /// Ceiling applied to stored bias values.
    pub max_value: f64,
    pub density: DensityMethod,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            gsd_min: 1.75,
            gsd_max: 4.0,
            gsd_step: 0.05,
            mmad_min: 0.5,
            mmad_max: 30.0,
            mmad_step: 0.5,
            dp_min: 1.0,
            dp_max: 18.0,
            dp_step: 1.0,
            data_set: DataSet::Optimised,
            compare: Compare::Total,
            set_dp: true,
            area_of_interest: true,
            max_value: 400.0,
            density: DensityMethod::Normal,
        }
    }
}

impl RunParameters {
    /// Check everything that can be checked before touching the grid.
    ///
    /// Range errors are reported before domain errors so a swapped min/max is
    /// not misreported as a bad logarithm argument.
    pub fn validate(&self) -> Result<(), AppError> {
        crate::grid::check_range("gsd", self.gsd_min, self.gsd_max, self.gsd_step)?;
        crate::grid::check_range("mmad", self.mmad_min, self.mmad_max, self.mmad_step)?;
        if self.set_dp {
            crate::grid::check_range("dp", self.dp_min, self.dp_max, self.dp_step)?;
        }

        if self.gsd_min <= 1.0 {
            return Err(AppError::domain(format!(
                "gsd_min must be > 1 (ln(gsd) is the density scale), got {}.",
                self.gsd_min
            )));
        }
        if self.mmad_min <= 0.0 {
            return Err(AppError::domain(format!(
                "mmad_min must be > 0, got {}.",
                self.mmad_min
            )));
        }
        if self.set_dp && self.dp_min <= 0.0 {
            return Err(AppError::domain(format!(
                "dp_min must be > 0, got {}.",
                self.dp_min
            )));
        }
        if !self.max_value.is_finite() {
            return Err(AppError::configuration("max_value must be finite."));
        }
        Ok(())
    }

    /// Parameters as ordered `(key, value)` pairs, used by the text dump.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("gsd_min", self.gsd_min.to_string()),
            ("gsd_max", self.gsd_max.to_string()),
            ("gsd_step", self.gsd_step.to_string()),
            ("mmad_min", self.mmad_min.to_string()),
            ("mmad_max", self.mmad_max.to_string()),
            ("mmad_step", self.mmad_step.to_string()),
            ("dp_min", self.dp_min.to_string()),
            ("dp_max", self.dp_max.to_string()),
            ("dp_step", self.dp_step.to_string()),
            ("data_set", self.data_set.name().to_string()),
            ("compare", self.compare.name().to_string()),
            ("set_dp", self.set_dp.to_string()),
            ("area_of_interest", self.area_of_interest.to_string()),
            ("max_value", self.max_value.to_string()),
            ("density", self.density.name().to_string()),
        ]
    }

    /// Rebuild parameters from `(key, value)` pairs; unknown keys are rejected.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut params = RunParameters::default();
        for (key, value) in pairs {
            let value = value.trim();
            match key.trim() {
                "gsd_min" => params.gsd_min = parse_f64(key, value)?,
                "gsd_max" => params.gsd_max = parse_f64(key, value)?,
                "gsd_step" => params.gsd_step = parse_f64(key, value)?,
                "mmad_min" => params.mmad_min = parse_f64(key, value)?,
                "mmad_max" => params.mmad_max = parse_f64(key, value)?,
                "mmad_step" => params.mmad_step = parse_f64(key, value)?,
                "dp_min" => params.dp_min = parse_f64(key, value)?,
                "dp_max" => params.dp_max = parse_f64(key, value)?,
                "dp_step" => params.dp_step = parse_f64(key, value)?,
                "data_set" => params.data_set = value.parse()?,
                "compare" => params.compare = value.parse()?,
                "set_dp" => params.set_dp = parse_bool(key, value)?,
                // Older dumps used the misspelt key.
                "area_of_interest" | "area_of_intrest" => {
                    params.area_of_interest = parse_bool(key, value)?
                }
                "max_value" => params.max_value = parse_f64(key, value)?,
                "density" => params.density = value.parse()?,
                other => {
                    return Err(AppError::configuration(format!(
                        "Unknown parameter '{other}'."
                    )));
                }
            }
        }
        Ok(params)
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64, AppError> {
    value
        .parse::<f64>()
        .map_err(|e| AppError::configuration(format!("Invalid number for {key}: '{value}' ({e}).")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AppError> {
    match value {
        "true" | "True" | "Yes" | "yes" => Ok(true),
        "false" | "False" | "No" | "no" => Ok(false),
        other => Err(AppError::configuration(format!(
            "Invalid boolean for {key}: '{other}'."
        ))),
    }
}

/// One cell of the bias map.
///
/// Masked cells lie outside the region of interest and carry no value; they
/// must stay distinguishable from a genuine zero bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BiasCell {
    Value(f64),
    Masked,
}

impl BiasCell {
    pub fn value(self) -> Option<f64> {
        match self {
            BiasCell::Value(v) => Some(v),
            BiasCell::Masked => None,
        }
    }

    pub fn is_masked(self) -> bool {
        matches!(self, BiasCell::Masked)
    }
}

/// Bias values indexed `[gsd_index][mmad_index]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasField {
    rows: Vec<Vec<BiasCell>>,
}

impl BiasField {
    /// Build a field from rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<BiasCell>>) -> Result<Self, AppError> {
        if let Some(first) = rows.first() {
            let width = first.len();
            if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
                return Err(AppError::configuration(format!(
                    "Ragged bias field: row {i} has {} cells, expected {width}.",
                    row.len()
                )));
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<BiasCell>] {
        &self.rows
    }

    pub fn n_gsd(&self) -> usize {
        self.rows.len()
    }

    pub fn n_mmad(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, gsd_idx: usize, mmad_idx: usize) -> Option<BiasCell> {
        self.rows.get(gsd_idx).and_then(|r| r.get(mmad_idx)).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = BiasCell> + '_ {
        self.rows.iter().flatten().copied()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn masked_count(&self) -> usize {
        self.cells().filter(|c| c.is_masked()).count()
    }

    /// Field with masked cells as `None`, the shape external renderers expect.
    pub fn to_options(&self) -> Vec<Vec<Option<f64>>> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|c| c.value()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_accepts_legacy_spelling() {
        assert_eq!("inhalible".parse::<Compare>().unwrap(), Compare::Inhalable);
        assert_eq!("inhalable".parse::<Compare>().unwrap(), Compare::Inhalable);
        let err = "respirable".parse::<Compare>().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn unknown_data_set_is_configuration_error() {
        let err = "tuned".parse::<DataSet>().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn pairs_roundtrip_through_strings() {
        let params = RunParameters {
            compare: Compare::Inhalable,
            area_of_interest: false,
            max_value: 250.0,
            ..RunParameters::default()
        };
        let pairs = params.to_pairs();
        let back = RunParameters::from_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str()))).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn validate_rejects_gsd_at_or_below_one() {
        let params = RunParameters {
            gsd_min: 1.0,
            ..RunParameters::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Domain);
    }

    #[test]
    fn validate_rejects_swapped_bounds_as_range_error() {
        let params = RunParameters {
            mmad_min: 5.0,
            mmad_max: 1.0,
            ..RunParameters::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidRange);
    }

    #[test]
    fn ragged_field_is_rejected() {
        let rows = vec![vec![BiasCell::Value(1.0)], vec![]];
        assert!(BiasField::from_rows(rows).is_err());
    }

    #[test]
    fn masked_cells_are_not_zero() {
        let field = BiasField::from_rows(vec![vec![BiasCell::Masked, BiasCell::Value(0.0)]]).unwrap();
        assert_eq!(field.masked_count(), 1);
        assert_eq!(field.to_options(), vec![vec![None, Some(0.0)]]);
    }
}
