//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - assembles run parameters (flags or parameter file)
//! - runs the bias-map pipeline
//! - prints the summary
//! - writes optional dump/JSON outputs

use std::path::Path;

use clap::Parser;
use log::info;

use crate::cli::{Command, CurvesArgs, ModelArgs, RunArgs, StatsArgs};
use crate::domain::RunParameters;
use crate::error::AppError;
use crate::models::PenetrationCurves;

pub mod pipeline;

/// Entry point for the `biasmap` binary.
pub fn run() -> Result<(), AppError> {
    // `biasmap` and `biasmap --gsd-min 2 ...` behave like `biasmap run ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Curves(args) => handle_curves(args),
        Command::Stats(args) => handle_stats(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let params = params_from_args(&args)?;
    let diameters = load_diameters(&params, args.model.diameters.as_deref())?;

    let run = pipeline::run_bias_map(&params, diameters)?;

    println!("{}", crate::report::format_run_summary(&run));

    if let Some(path) = &args.dump {
        crate::io::write_dump(path, &run.params, &run.field)?;
        info!("wrote dump to {}", path.display());
    }
    if let Some(path) = &args.export_json {
        crate::io::write_field_json(path, &run)?;
        info!("wrote field JSON to {}", path.display());
    }

    Ok(())
}

fn handle_curves(args: CurvesArgs) -> Result<(), AppError> {
    let params = model_params(&args.model, RunParameters::default());
    params.validate()?;
    let supplied = load_diameters(&params, args.model.diameters.as_deref())?;
    let diameters = pipeline::resolve_diameters(&params, supplied)?;
    let curves = PenetrationCurves::evaluate(&diameters, params.data_set)?;

    match &args.export {
        Some(path) => {
            crate::io::write_curves_csv(path, &curves)?;
            info!("wrote {} curve rows to {}", diameters.len(), path.display());
        }
        None => print!("{}", crate::report::format_curves_table(&curves)),
    }
    Ok(())
}

fn handle_stats(args: StatsArgs) -> Result<(), AppError> {
    let (params, field) = crate::io::read_dump(&args.dump)?;
    info!(
        "read {} x {} field ({} vs {})",
        field.n_gsd(),
        field.n_mmad(),
        params.data_set,
        params.compare
    );
    let stats = crate::report::summarize(&field)?;
    print!("{}", crate::report::format_stats(&stats));
    Ok(())
}

/// Build run parameters from flags, or from `--params` when given.
pub fn params_from_args(args: &RunArgs) -> Result<RunParameters, AppError> {
    if let Some(path) = &args.params {
        let mut params = crate::io::read_params_json(path)?;
        // A diameter file on the command line still overrides generation.
        if args.model.diameters.is_some() {
            params.set_dp = false;
        }
        return Ok(params);
    }

    let base = RunParameters {
        gsd_min: args.gsd_min,
        gsd_max: args.gsd_max,
        gsd_step: args.gsd_step,
        mmad_min: args.mmad_min,
        mmad_max: args.mmad_max,
        mmad_step: args.mmad_step,
        compare: args.compare,
        area_of_interest: args.area_of_interest,
        max_value: args.max_value,
        density: args.density,
        ..RunParameters::default()
    };
    Ok(model_params(&args.model, base))
}

fn model_params(model: &ModelArgs, base: RunParameters) -> RunParameters {
    RunParameters {
        dp_min: model.dp_min,
        dp_max: model.dp_max,
        dp_step: model.dp_step,
        data_set: model.data_set,
        set_dp: model.diameters.is_none(),
        ..base
    }
}

fn load_diameters(params: &RunParameters, path: Option<&Path>) -> Result<Option<Vec<f64>>, AppError> {
    match path {
        Some(path) if !params.set_dp => crate::io::read_diameters_csv(path).map(Some),
        _ => Ok(None),
    }
}

/// Rewrite argv so `biasmap` defaults to `biasmap run`.
///
/// Rules:
/// - `biasmap`                          -> `biasmap run`
/// - `biasmap --gsd-min 2 ...`          -> `biasmap run --gsd-min 2 ...`
/// - `biasmap --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "curves" | "stats");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    argv
}
