//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{PipelinePaths, DEFAULT_OUTPUT_DIR, DEFAULT_RAW_DIR};

/// crimekey - Clean incident data, reconcile it with the truth set and build the test key.
///
/// With no arguments, reads `raw_data/{truth,train,test}.csv` and writes
/// `processed_data/{train_clean,test_clean,truth_clean,key}.csv`.
#[derive(Parser, Debug)]
#[command(name = "crimekey")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding truth.csv, train.csv and test.csv
    #[arg(long, default_value = DEFAULT_RAW_DIR)]
    pub raw_dir: PathBuf,

    /// Directory the cleaned tables and key are written to (created if missing)
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Also write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl Cli {
    pub fn paths(&self) -> PipelinePaths {
        PipelinePaths::new(self.raw_dir.clone(), self.output_dir.clone())
    }
}
