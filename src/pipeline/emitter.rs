//! Writing cleaned tables and deriving the test-set key

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::loader::OUTPUT_TIMESTAMP_FORMAT;
use super::schema::{CATEGORY, ID};

/// File name of the derived key inside the output directory.
pub const KEY_FILE_NAME: &str = "key.csv";

/// Write a table as CSV with `Dates` in [`OUTPUT_TIMESTAMP_FORMAT`].
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_csv_to(df, file).with_context(|| format!("Failed to write CSV file: {}", path.display()))
}

/// Write a table as CSV, with header, to any writer.
pub fn write_csv_to<W: Write>(df: &mut DataFrame, writer: W) -> Result<()> {
    CsvWriter::new(writer)
        .include_header(true)
        .with_datetime_format(Some(OUTPUT_TIMESTAMP_FORMAT.to_string()))
        .finish(df)?;
    Ok(())
}

/// Reorder so that `index` is the first column, as a persisted row index.
pub fn with_index_first(df: &DataFrame, index: &str) -> Result<DataFrame> {
    let mut order = vec![index.to_string()];
    order.extend(
        df.get_column_names()
            .into_iter()
            .filter(|name| name.as_str() != index)
            .map(|name| name.to_string()),
    );
    Ok(df.select(order)?)
}

/// Restrict truth to exactly the train columns, in train order.
pub fn project_to_columns(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    df.select(columns.iter().map(String::as_str))
        .context("Truth table is missing columns present in the train table")
}

/// Distinct non-null categories in the merged test table, sorted.
pub fn key_categories(merged_test: &DataFrame) -> Result<Vec<String>> {
    let categories: BTreeSet<String> = merged_test
        .column(CATEGORY)?
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();
    Ok(categories.into_iter().collect())
}

/// Derive the per-`Id` category probability table from the test↔truth join.
///
/// `Category` is one-hot expanded into one column per category (named by the
/// category itself) and averaged per `Id`, so an `Id` matched to several truth
/// rows gets a distribution and an unmatched `Id` gets all zeros. Rows are
/// sorted by `Id`, which comes first.
pub fn build_key(merged_test: &DataFrame) -> Result<DataFrame> {
    let categories = key_categories(merged_test)?;

    let mut one_hot = vec![col(ID)];
    one_hot.extend(categories.iter().map(|category| {
        when(col(CATEGORY).eq(lit(category.as_str())))
            .then(lit(1.0))
            .otherwise(lit(0.0))
            .alias(category.as_str())
    }));

    let means: Vec<Expr> = categories
        .iter()
        .map(|category| col(category.as_str()).mean())
        .collect();

    let key = merged_test
        .clone()
        .lazy()
        .select(one_hot)
        .group_by([col(ID)])
        .agg(means)
        .sort([ID], SortMultipleOptions::default())
        .collect()
        .context("Failed to derive the test-set key")?;

    Ok(key)
}
