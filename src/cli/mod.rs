//! Command-line parsing for the bias map calculator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! numerical code. Defaults match the values the original input form shipped
//! with.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Compare, DataSet, DensityMethod};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "biasmap", version, about = "Foam sampler bias map calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute a bias map, print summary statistics, and optionally write outputs.
    Run(RunArgs),
    /// Print (or export) the foam, inhalable and respirable curves.
    Curves(CurvesArgs),
    /// Recompute summary statistics from a previously written dump.
    Stats(StatsArgs),
}

/// Grid and model options shared by `run` and `curves`.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Minimum particle diameter (µm) of the calculation grid.
    #[arg(long, default_value_t = 1.0)]
    pub dp_min: f64,

    /// Maximum particle diameter (µm).
    #[arg(long, default_value_t = 18.0)]
    pub dp_max: f64,

    /// Particle diameter step (µm).
    #[arg(long, default_value_t = 1.0)]
    pub dp_step: f64,

    /// Read diameters from the first column of a CSV file instead of generating them.
    #[arg(long, value_name = "CSV")]
    pub diameters: Option<PathBuf>,

    /// Foam penetration curve to use.
    #[arg(long, value_enum, default_value_t = DataSet::Optimised)]
    pub data_set: DataSet,
}

/// Options for computing a bias map.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Load all run parameters from a JSON file (grid/model flags are then ignored).
    #[arg(long, value_name = "JSON")]
    pub params: Option<PathBuf>,

    /// Minimum geometric standard deviation.
    #[arg(long, default_value_t = 1.75)]
    pub gsd_min: f64,

    /// Maximum geometric standard deviation.
    #[arg(long, default_value_t = 4.0)]
    pub gsd_max: f64,

    /// GSD step.
    #[arg(long, default_value_t = 0.05)]
    pub gsd_step: f64,

    /// Minimum mass median aerodynamic diameter (µm).
    #[arg(long, default_value_t = 0.5)]
    pub mmad_min: f64,

    /// Maximum mass median aerodynamic diameter (µm).
    #[arg(long, default_value_t = 30.0)]
    pub mmad_max: f64,

    /// MMAD step (µm).
    #[arg(long, default_value_t = 0.5)]
    pub mmad_step: f64,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Respirable reference expressed as a fraction of the inhalable or total aerosol.
    #[arg(long, value_enum, default_value_t = Compare::Total)]
    pub compare: Compare,

    /// Only keep grid points inside the region of interest.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub area_of_interest: bool,

    /// Ceiling for stored bias values.
    #[arg(long, default_value_t = 400.0)]
    pub max_value: f64,

    /// Density form evaluated at each diameter.
    #[arg(long, value_enum, default_value_t = DensityMethod::Normal)]
    pub density: DensityMethod,

    /// Write the parameters and field as a text dump.
    #[arg(long, value_name = "PATH")]
    pub dump: Option<PathBuf>,

    /// Write a JSON view of the field (axes, mesh, masked cells as null) for plotting.
    #[arg(long = "export-json", value_name = "PATH")]
    pub export_json: Option<PathBuf>,
}

/// Options for the curves table.
#[derive(Debug, Parser, Clone)]
pub struct CurvesArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Write the table as CSV instead of printing it.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

/// Options for recomputing statistics from a dump.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Dump file produced by `biasmap run --dump`.
    #[arg(value_name = "DUMP")]
    pub dump: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults_match_input_form() {
        let cli = Cli::parse_from(["biasmap", "run"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.gsd_min, 1.75);
        assert_eq!(args.mmad_max, 30.0);
        assert_eq!(args.model.data_set, DataSet::Optimised);
        assert_eq!(args.compare, Compare::Total);
        assert!(args.area_of_interest);
        assert_eq!(args.max_value, 400.0);
    }

    #[test]
    fn area_of_interest_can_be_disabled() {
        let cli = Cli::parse_from(["biasmap", "run", "--area-of-interest", "false", "--compare", "inhalible"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(!args.area_of_interest);
        assert_eq!(args.compare, Compare::Inhalable);
    }

    #[test]
    fn unknown_data_set_is_rejected() {
        assert!(Cli::try_parse_from(["biasmap", "run", "--data-set", "tuned"]).is_err());
    }
}
