//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run configuration enums (`DataSet`, `Compare`, `DensityMethod`)
//! - the run parameter record (`RunParameters`)
//! - the computed field (`BiasField`, `BiasCell`)

pub mod types;

pub use types::*;
