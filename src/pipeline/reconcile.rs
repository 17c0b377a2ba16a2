//! Reconciliation of train/test rows against the truth table
//!
//! Rows are matched on every column the two sides share except a small,
//! explicitly listed set that differs structurally between sources
//! (identifiers, labels, resolution and free-text address).

use anyhow::{Context, Result};
use polars::prelude::*;

use super::emitter::write_csv_to;
use super::error::PipelineError;
use super::schema::{TableKind, ADDRESS, ID, PD_ID, RESOLUTION};

/// How one table is joined onto the truth table.
#[derive(Debug, Clone)]
pub struct JoinSpec {
    /// Which source is on the left side
    pub table: TableKind,
    /// Left columns that never take part in the join key
    pub excluded_columns: Vec<String>,
}

impl JoinSpec {
    pub fn new(table: TableKind, excluded_columns: &[&str]) -> Self {
        Self {
            table,
            excluded_columns: excluded_columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Train rows can disagree with truth on address formatting and resolution.
    pub fn train() -> Self {
        Self::new(TableKind::Train, &[ADDRESS, RESOLUTION])
    }

    /// Test rows carry their own `Id` and may format addresses differently.
    pub fn test() -> Self {
        Self::new(TableKind::Test, &[ADDRESS, ID])
    }

    /// Join key: the left table's columns, in order, minus the exclusions.
    ///
    /// Every key column must also exist in the truth table.
    pub fn join_key(&self, left: &DataFrame, truth: &DataFrame) -> Result<Vec<String>, PipelineError> {
        let truth_columns = truth.get_column_names();
        let mut key = Vec::new();

        for name in left.get_column_names() {
            if self.excluded_columns.iter().any(|c| c == name.as_str()) {
                continue;
            }
            if !truth_columns.contains(&name) {
                return Err(PipelineError::MissingColumn {
                    table: TableKind::Truth,
                    column: name.to_string(),
                });
            }
            key.push(name.to_string());
        }

        Ok(key)
    }

    /// Human-readable name used in the unmatched-rows warning.
    pub fn data_label(&self) -> &'static str {
        match self.table {
            TableKind::Train => "training",
            TableKind::Test => "test",
            TableKind::Truth => "truth",
        }
    }
}

/// Result of joining one table onto truth
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Left join of the input table with truth
    pub merged: DataFrame,
    /// Merged rows without a truth identifier, projected to the left table's columns
    pub unmatched: DataFrame,
    /// Columns used to match
    pub join_key: Vec<String>,
}

impl Reconciliation {
    pub fn unmatched_count(&self) -> usize {
        self.unmatched.height()
    }

    pub fn is_complete(&self) -> bool {
        self.unmatched.height() == 0
    }

    /// Print the rows that found no truth record. Does nothing when all matched.
    ///
    /// Rows are written as CSV so every column and every row is shown in full.
    pub fn warn_unmatched(&self, spec: &JoinSpec) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }
        println!(
            "WARNING:  The following {} data cannot be merged to the truth data:",
            spec.data_label()
        );
        let mut unmatched = self.unmatched.clone();
        write_csv_to(&mut unmatched, std::io::stdout().lock())
            .with_context(|| format!("Failed to print unmatched {} rows", spec.data_label()))
    }
}

/// Left-join `left` onto `truth` and collect rows that found no match.
///
/// Every left row is kept; a left row matching several truth rows appears once
/// per match. Unmatched rows carry nulls in every truth-only column. Null key
/// values match each other, so an empty field on both sides still pairs up.
pub fn reconcile(left: &DataFrame, truth: &DataFrame, spec: &JoinSpec) -> Result<Reconciliation> {
    if !truth.get_column_names().iter().any(|c| c.as_str() == PD_ID) {
        return Err(PipelineError::MissingColumn {
            table: TableKind::Truth,
            column: PD_ID.to_string(),
        }
        .into());
    }

    let join_key = spec.join_key(left, truth)?;
    let key_exprs: Vec<Expr> = join_key.iter().map(|c| col(c.as_str())).collect();

    let merged = left
        .clone()
        .lazy()
        .join(
            truth.clone().lazy(),
            key_exprs.clone(),
            key_exprs,
            JoinArgs {
                join_nulls: true,
                ..JoinArgs::new(JoinType::Left)
            },
        )
        .collect()?;

    let left_columns: Vec<Expr> = left
        .get_column_names()
        .iter()
        .map(|c| col(c.as_str()))
        .collect();

    let unmatched = merged
        .clone()
        .lazy()
        .filter(col(PD_ID).is_null())
        .select(left_columns)
        .collect()?;

    Ok(Reconciliation {
        merged,
        unmatched,
        join_key,
    })
}
