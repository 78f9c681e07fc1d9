//! Mathematical utilities: log-scale normal curves and weighted sums.

pub mod normal;
pub mod weighted;

pub use normal::*;
pub use weighted::*;
