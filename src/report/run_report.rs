//! JSON run report export

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{CorrectionStats, TableKind};
use crate::report::CleaningSummary;

/// Metadata about the run
#[derive(Debug, Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub crimekey_version: String,
    pub raw_dir: String,
    pub output_dir: String,
    /// Entries in the address correction table
    pub correction_entries: usize,
}

/// Per-table section of the report
#[derive(Debug, Serialize)]
pub struct TableReport {
    pub table: TableKind,
    pub rows: usize,
    #[serde(flatten)]
    pub corrections: CorrectionStats,
    pub uncorrected_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmatched_rows: Option<usize>,
}

/// Complete run report
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub metadata: RunMetadata,
    pub tables: Vec<TableReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmatched_test_ids: Vec<i64>,
    pub key_rows: usize,
    pub key_categories: Vec<String>,
    pub elapsed_seconds: f64,
}

impl RunReport {
    pub fn from_summary(
        summary: &CleaningSummary,
        raw_dir: &Path,
        output_dir: &Path,
        correction_entries: usize,
    ) -> Self {
        let tables = summary
            .tables
            .iter()
            .map(|entry| TableReport {
                table: entry.table,
                rows: entry.rows,
                corrections: entry.corrections,
                uncorrected_rows: entry.corrections.uncorrected_rows(),
                unmatched_rows: match entry.table {
                    TableKind::Train => Some(summary.unmatched_train),
                    TableKind::Test => Some(summary.unmatched_test),
                    TableKind::Truth => None,
                },
            })
            .collect();

        Self {
            metadata: RunMetadata {
                timestamp: Utc::now().to_rfc3339(),
                crimekey_version: env!("CARGO_PKG_VERSION").to_string(),
                raw_dir: raw_dir.display().to_string(),
                output_dir: output_dir.display().to_string(),
                correction_entries,
            },
            tables,
            unmatched_test_ids: summary.unmatched_test_ids.clone(),
            key_rows: summary.key_rows,
            key_categories: summary.key_categories.clone(),
            elapsed_seconds: summary.total_time().as_secs_f64(),
        }
    }
}

/// Export the run report to a JSON file
pub fn export_run_report(report: &RunReport, output_path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).context("Failed to serialize run report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write run report to {}", output_path.display()))?;

    Ok(())
}
