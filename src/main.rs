//! crimekey: Incident Data Cleaning CLI
//!
//! Cleans the truth/train/test extracts and derives the test-set key.

use anyhow::Result;
use clap::Parser;

use crimekey::cli::Cli;
use crimekey::pipeline::{run_pipeline, CorrectionTable};
use crimekey::report::{export_run_report, RunReport};
use crimekey::utils::{print_banner, print_completion, print_config, print_success};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = cli.paths();
    let corrections = CorrectionTable::curated();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&paths.raw_dir, &paths.output_dir, corrections.len());

    let summary = run_pipeline(&paths, &corrections)?;

    summary.display();

    if let Some(report_path) = &cli.report {
        let report =
            RunReport::from_summary(&summary, &paths.raw_dir, &paths.output_dir, corrections.len());
        export_run_report(&report, report_path)?;
        print_success(&format!("Run report saved to {}", report_path.display()));
    }

    print_completion();

    Ok(())
}
