//! Source table loading and normalization
//!
//! Every raw file is read with all columns as strings; typed columns are then
//! established explicitly so that the three sources agree on representation
//! before any comparison happens.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use polars::prelude::*;

use super::error::PipelineError;
use super::schema::{TableKind, CATEGORY, DATE, DATES, ID, TIME, X, Y};

/// Timestamp layouts accepted for `Dates` (and for truth's `Date Time`).
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Layout used when timestamps are written back out.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Read a CSV file with every column as `String`.
pub fn read_raw_csv(path: &Path) -> Result<DataFrame> {
    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))
}

/// Load one source table from disk and normalize it.
pub fn load_table(kind: TableKind, path: &Path) -> Result<DataFrame> {
    let df = read_raw_csv(path)?;
    normalize_table(kind, df)
        .with_context(|| format!("Failed to normalize {} table from {}", kind, path.display()))
}

/// Establish typed columns for a raw (all-string) table.
///
/// - truth: derive `Dates` from `Date` + `Time`, strip commas from `Category`
/// - train/test: parse the existing `Dates`
/// - all: `X`/`Y` become `Float64`; test `Id` becomes `Int64`
pub fn normalize_table(kind: TableKind, mut df: DataFrame) -> Result<DataFrame> {
    require_columns(&df, kind)?;

    match kind {
        TableKind::Truth => {
            let dates = derive_truth_dates(&df)?;
            df.with_column(dates)?;
            let category = normalize_category_column(&df)?;
            df.with_column(category)?;
        }
        TableKind::Train | TableKind::Test => {
            let dates = parse_timestamps(kind, df.column(DATES)?.str()?)?;
            df.with_column(dates)?;
        }
    }

    for name in [X, Y] {
        let coords = df
            .column(name)?
            .as_materialized_series()
            .strict_cast(&DataType::Float64)
            .map_err(|_| PipelineError::InvalidCoordinate {
                table: kind,
                column: name.to_string(),
            })?;
        df.with_column(coords)?;
    }

    if kind == TableKind::Test {
        let ids = df
            .column(ID)?
            .as_materialized_series()
            .strict_cast(&DataType::Int64)
            .map_err(|_| PipelineError::InvalidIdentifier {
                table: kind,
                column: ID.to_string(),
            })?;
        df.with_column(ids)?;
    }

    Ok(df)
}

/// Fail if any column the source must provide is absent.
pub fn require_columns(df: &DataFrame, kind: TableKind) -> Result<(), PipelineError> {
    let present = df.get_column_names();
    for column in kind.required_columns() {
        if !present.iter().any(|name| name.as_str() == *column) {
            return Err(PipelineError::MissingColumn {
                table: kind,
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Parse a timestamp with the first accepted layout that fits.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Parse a column of timestamp text into a `Dates` datetime series.
///
/// A null or unparseable value aborts with [`PipelineError::MalformedTimestamp`];
/// missing timestamps are never carried forward as null.
pub fn parse_timestamps<I, S>(kind: TableKind, values: I) -> Result<Series, PipelineError>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut parsed = Vec::new();
    for (row, value) in values.into_iter().enumerate() {
        let text: &str = match &value {
            Some(v) => v.as_ref(),
            None => "",
        };
        let timestamp = parse_timestamp(text).ok_or_else(|| PipelineError::MalformedTimestamp {
            table: kind,
            row,
            value: text.to_string(),
        })?;
        parsed.push(timestamp);
    }

    Ok(
        DatetimeChunked::from_naive_datetime(DATES.into(), parsed, TimeUnit::Microseconds)
            .into_series(),
    )
}

/// Remove the commas the train/test sources already lack, e.g.
/// `"LARCENY, THEFT"` → `"LARCENY THEFT"`.
pub fn normalize_category(category: &str) -> String {
    category.replace(',', "")
}

fn derive_truth_dates(df: &DataFrame) -> Result<Series> {
    let dates = df.column(DATE)?.str()?;
    let times = df.column(TIME)?.str()?;

    let combined = dates.into_iter().zip(times).map(|(date, time)| match (date, time) {
        (Some(date), Some(time)) => Some(format!("{} {}", date, time)),
        _ => None,
    });

    Ok(parse_timestamps(TableKind::Truth, combined)?)
}

fn normalize_category_column(df: &DataFrame) -> Result<Column> {
    let categories: Vec<Option<String>> = df
        .column(CATEGORY)?
        .str()?
        .into_iter()
        .map(|value| value.map(normalize_category))
        .collect();
    Ok(Column::new(CATEGORY.into(), categories))
}
