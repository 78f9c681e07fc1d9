//! `bias-map` library crate.
//!
//! Computes maps of the bias between a foam sampler's penetration curve and
//! the respirable/inhalable reference conventions, over a grid of aerosol
//! size distributions (GSD x MMAD).
//!
//! The binary (`biasmap`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the computation can be driven from other front-ends

pub mod app;
pub mod bias;
pub mod cli;
pub mod domain;
pub mod error;
pub mod grid;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
