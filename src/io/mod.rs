//! Input/output helpers.
//!
//! - parameter file + diameter list loading (`ingest`)
//! - text dump of parameters and field (`dump`)
//! - JSON field view for renderers (`view`)
//! - penetration curve CSV (`export`)

pub mod dump;
pub mod export;
pub mod ingest;
pub mod view;

pub use dump::*;
pub use export::*;
pub use ingest::*;
pub use view::*;
