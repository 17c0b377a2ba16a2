//! End-to-end cleaning run: load, correct, reconcile, emit

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::corrections::CorrectionTable;
use super::corrector::{correct_coordinates, round_coordinates, CorrectionStats};
use super::emitter::{build_key, project_to_columns, with_index_first, write_csv, KEY_FILE_NAME};
use super::loader::load_table;
use super::reconcile::{reconcile, JoinSpec, Reconciliation};
use super::schema::{TableKind, ID};
use crate::report::CleaningSummary;
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_count, print_info,
    print_step_header, print_step_time, print_success,
};

/// Default raw input directory
pub const DEFAULT_RAW_DIR: &str = "raw_data";
/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "processed_data";

/// Where sources are read from and cleaned files are written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    pub raw_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl PipelinePaths {
    pub fn new(raw_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn input(&self, table: TableKind) -> PathBuf {
        self.raw_dir.join(table.input_file_name())
    }

    pub fn output(&self, table: TableKind) -> PathBuf {
        self.output_dir.join(table.output_file_name())
    }

    pub fn key(&self) -> PathBuf {
        self.output_dir.join(KEY_FILE_NAME)
    }
}

impl Default for PipelinePaths {
    fn default() -> Self {
        Self::new(DEFAULT_RAW_DIR, DEFAULT_OUTPUT_DIR)
    }
}

/// The three normalized source tables
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub truth: DataFrame,
    pub train: DataFrame,
    pub test: DataFrame,
}

impl SourceTables {
    pub fn get(&self, table: TableKind) -> &DataFrame {
        match table {
            TableKind::Truth => &self.truth,
            TableKind::Train => &self.train,
            TableKind::Test => &self.test,
        }
    }

    pub fn get_mut(&mut self, table: TableKind) -> &mut DataFrame {
        match table {
            TableKind::Truth => &mut self.truth,
            TableKind::Train => &mut self.train,
            TableKind::Test => &mut self.test,
        }
    }
}

/// Both joins against truth
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub train: Reconciliation,
    pub test: Reconciliation,
}

/// Read and normalize all three sources.
pub fn load_sources(paths: &PipelinePaths) -> Result<SourceTables> {
    Ok(SourceTables {
        truth: load_table(TableKind::Truth, &paths.input(TableKind::Truth))?,
        train: load_table(TableKind::Train, &paths.input(TableKind::Train))?,
        test: load_table(TableKind::Test, &paths.input(TableKind::Test))?,
    })
}

/// Apply address corrections to every table, then round all coordinates.
pub fn correct_sources(
    tables: &mut SourceTables,
    corrections: &CorrectionTable,
) -> Result<Vec<(TableKind, CorrectionStats)>> {
    let mut stats = Vec::with_capacity(TableKind::ALL.len());
    for table in TableKind::ALL {
        let table_stats = correct_coordinates(tables.get_mut(table), corrections)
            .with_context(|| format!("Failed to correct {} coordinates", table))?;
        stats.push((table, table_stats));
    }

    for table in TableKind::ALL {
        round_coordinates(tables.get_mut(table))?;
    }

    Ok(stats)
}

/// Join train and test onto truth.
pub fn reconcile_sources(tables: &SourceTables) -> Result<Reconciled> {
    Ok(Reconciled {
        train: reconcile(&tables.train, &tables.truth, &JoinSpec::train())
            .context("Failed to reconcile train with truth")?,
        test: reconcile(&tables.test, &tables.truth, &JoinSpec::test())
            .context("Failed to reconcile test with truth")?,
    })
}

/// Write cleaned train/test/truth and the key. Returns the key table.
pub fn emit_outputs(
    paths: &PipelinePaths,
    tables: &SourceTables,
    reconciled: &Reconciled,
) -> Result<DataFrame> {
    std::fs::create_dir_all(&paths.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            paths.output_dir.display()
        )
    })?;

    let mut train = tables.train.clone();
    write_csv(&mut train, &paths.output(TableKind::Train))?;

    let mut test = with_index_first(&tables.test, ID)?;
    write_csv(&mut test, &paths.output(TableKind::Test))?;

    let train_columns: Vec<String> = tables
        .train
        .get_column_names()
        .iter()
        .map(|c| c.to_string())
        .collect();
    let mut truth = project_to_columns(&tables.truth, &train_columns)?;
    write_csv(&mut truth, &paths.output(TableKind::Truth))?;

    let mut key = build_key(&reconciled.test.merged)?;
    write_csv(&mut key, &paths.key())?;

    Ok(key)
}

/// Run every stage in order, printing progress, and return the run summary.
///
/// Unmatched train/test rows are printed as warnings and do not stop the run.
pub fn run_pipeline(paths: &PipelinePaths, corrections: &CorrectionTable) -> Result<CleaningSummary> {
    let mut summary = CleaningSummary::new();

    // Step 1: Load
    print_step_header(1, "Load & Normalize");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading truth, train and test...");
    let mut tables = load_sources(paths)?;
    finish_with_success(&spinner, "Sources loaded");
    for table in TableKind::ALL {
        let rows = tables.get(table).height();
        summary.add_table(table, rows);
        print_count(&format!("{} row(s)", table), rows, Some(&display_path(&paths.input(table))));
    }
    summary.load_time = step_start.elapsed();
    print_step_time(summary.load_time);

    // Step 2: Correct
    print_step_header(2, "Coordinate Correction");
    let step_start = Instant::now();
    let spinner = create_spinner("Correcting sentinel coordinates...");
    let stats = correct_sources(&mut tables, corrections)?;
    finish_with_success(&spinner, "Coordinates corrected and rounded");
    for (table, table_stats) in stats {
        summary.set_corrections(table, table_stats);
        if table_stats.invalid_rows > 0 {
            print_count(
                &format!("{} sentinel row(s) corrected", table),
                table_stats.corrected_rows,
                Some(&format!("(of {})", table_stats.invalid_rows)),
            );
        }
    }
    if summary.total_corrected() == 0 {
        print_info("No sentinel coordinates needed correction");
    }
    summary.correct_time = step_start.elapsed();
    print_step_time(summary.correct_time);

    // Step 3: Reconcile
    print_step_header(3, "Reconciliation");
    let step_start = Instant::now();
    let spinner = create_spinner("Joining train and test onto truth...");
    let reconciled = reconcile_sources(&tables)?;
    summary.unmatched_train = reconciled.train.unmatched_count();
    summary.unmatched_test = reconciled.test.unmatched_count();
    summary.unmatched_test_ids = unmatched_ids(&reconciled.test)?;
    if summary.unmatched_train + summary.unmatched_test == 0 {
        finish_with_success(&spinner, "Every train and test row matched truth");
    } else {
        finish_with_warning(&spinner, "Some rows could not be matched");
        reconciled.train.warn_unmatched(&JoinSpec::train())?;
        reconciled.test.warn_unmatched(&JoinSpec::test())?;
    }
    summary.reconcile_time = step_start.elapsed();
    print_step_time(summary.reconcile_time);

    // Step 4: Emit
    print_step_header(4, "Save Results");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing cleaned tables and key...");
    let key = emit_outputs(paths, &tables, &reconciled)?;
    finish_with_success(
        &spinner,
        &format!("Saved to {}", paths.output_dir.display()),
    );
    summary.key_rows = key.height();
    summary.key_categories = key
        .get_column_names()
        .iter()
        .filter(|c| c.as_str() != ID)
        .map(|c| c.to_string())
        .collect();
    print_success("Key derived from test ↔ truth matches");
    summary.emit_time = step_start.elapsed();
    print_step_time(summary.emit_time);

    Ok(summary)
}

fn unmatched_ids(reconciliation: &Reconciliation) -> Result<Vec<i64>> {
    Ok(reconciliation
        .unmatched
        .column(ID)?
        .i64()?
        .into_iter()
        .flatten()
        .collect())
}

fn display_path(path: &Path) -> String {
    format!("({})", path.display())
}
