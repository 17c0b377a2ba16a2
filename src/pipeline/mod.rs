//! Pipeline module - load, correct, reconcile and emit

pub mod corrections;
pub mod corrector;
pub mod emitter;
pub mod error;
pub mod loader;
pub mod reconcile;
pub mod runner;
pub mod schema;

pub use corrections::*;
pub use corrector::*;
pub use emitter::*;
pub use error::*;
pub use loader::*;
pub use reconcile::*;
pub use runner::*;
pub use schema::{TableKind, ADDRESS, CATEGORY, DATE, DATES, ID, PD_ID, RESOLUTION, TIME, X, Y};
