//! Curve models evaluated over particle diameter.
//!
//! Models are implemented as small, pure functions so the map computation can
//! stay generic over which reference curve and density form are selected.

pub mod density;
pub mod penetration;

pub use density::*;
pub use penetration::*;
