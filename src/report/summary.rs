//! Cleaning run summary

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{CorrectionStats, TableKind};

/// Row count and correction outcome for one source table
#[derive(Debug, Clone, Copy)]
pub struct TableSummary {
    pub table: TableKind,
    pub rows: usize,
    pub corrections: CorrectionStats,
}

/// Summary of a full cleaning run
#[derive(Debug, Default, Clone)]
pub struct CleaningSummary {
    pub tables: Vec<TableSummary>,
    pub unmatched_train: usize,
    pub unmatched_test: usize,
    /// `Id`s of test rows without a truth match
    pub unmatched_test_ids: Vec<i64>,
    pub key_rows: usize,
    pub key_categories: Vec<String>,
    pub load_time: Duration,
    pub correct_time: Duration,
    pub reconcile_time: Duration,
    pub emit_time: Duration,
}

impl CleaningSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, table: TableKind, rows: usize) {
        self.tables.push(TableSummary {
            table,
            rows,
            corrections: CorrectionStats::default(),
        });
    }

    pub fn set_corrections(&mut self, table: TableKind, stats: CorrectionStats) {
        if let Some(entry) = self.tables.iter_mut().find(|t| t.table == table) {
            entry.corrections = stats;
        }
    }

    pub fn table(&self, table: TableKind) -> Option<&TableSummary> {
        self.tables.iter().find(|t| t.table == table)
    }

    pub fn total_corrected(&self) -> usize {
        self.tables.iter().map(|t| t.corrections.corrected_rows).sum()
    }

    pub fn total_uncorrected(&self) -> usize {
        self.tables
            .iter()
            .map(|t| t.corrections.uncorrected_rows())
            .sum()
    }

    pub fn total_time(&self) -> Duration {
        self.load_time + self.correct_time + self.reconcile_time + self.emit_time
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CLEANING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Table").add_attribute(Attribute::Bold),
            Cell::new("Rows").add_attribute(Attribute::Bold),
            Cell::new("Sentinel").add_attribute(Attribute::Bold),
            Cell::new("Corrected").add_attribute(Attribute::Bold),
            Cell::new("Unmatched").add_attribute(Attribute::Bold),
        ]);

        for entry in &self.tables {
            let unmatched = match entry.table {
                TableKind::Train => Some(self.unmatched_train),
                TableKind::Test => Some(self.unmatched_test),
                TableKind::Truth => None,
            };
            let unmatched_cell = match unmatched {
                Some(0) => Cell::new(0).fg(Color::Green),
                Some(n) => Cell::new(n).fg(Color::Red),
                None => Cell::new("-").fg(Color::DarkGrey),
            };

            table.add_row(vec![
                Cell::new(entry.table.to_string()),
                Cell::new(entry.rows),
                Cell::new(entry.corrections.invalid_rows),
                Cell::new(entry.corrections.corrected_rows).fg(Color::Cyan),
                unmatched_cell,
            ]);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        println!();
        println!(
            "      Key: {} row(s) × {} categor{}",
            style(self.key_rows).yellow().bold(),
            style(self.key_categories.len()).yellow().bold(),
            if self.key_categories.len() == 1 { "y" } else { "ies" }
        );
        println!(
            "      Total time: {}",
            style(format!("{:.2}s", self.total_time().as_secs_f64())).dim()
        );
    }
}
