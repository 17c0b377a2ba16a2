//! crimekey: Incident Data Cleaning Library
//!
//! Normalizes the truth, train and test incident extracts, repairs
//! coordinates that failed to geocode, reconciles train/test rows against
//! the truth records and derives a per-`Id` category key for the test set.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
