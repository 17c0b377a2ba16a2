//! Report module - summarizing a cleaning run

pub mod run_report;
pub mod summary;

pub use run_report::*;
pub use summary::*;
