//! Bias-map computation.
//!
//! Responsibilities:
//!
//! - aggregate density-weighted curves into a bias percentage (`aggregate`)
//! - decide which grid points are in the region of interest (`region`)
//! - evaluate every grid point into a `BiasField` (parallel) (`map`)

pub mod aggregate;
pub mod map;
pub mod region;

pub use aggregate::*;
pub use map::*;
pub use region::*;
