//! Sentinel coordinate correction and precision normalization

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::corrections::CorrectionTable;
use super::schema::{ADDRESS, X, Y};

/// Latitude used upstream for rows that could not be geocoded.
pub const INVALID_LATITUDE: f64 = 90.0;

/// Decimal places kept on `X`/`Y` (about 14 cm at San Francisco's latitude).
pub const COORDINATE_DECIMALS: i32 = 6;

/// Outcome of a correction pass over one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorrectionStats {
    /// Rows at the sentinel before correction
    pub invalid_rows: usize,
    /// Sentinel rows whose address had a curated position
    pub corrected_rows: usize,
}

impl CorrectionStats {
    /// Sentinel rows left in place for lack of a curated position.
    pub fn uncorrected_rows(&self) -> usize {
        self.invalid_rows - self.corrected_rows
    }
}

/// True when a latitude is the "could not geocode" sentinel.
#[inline]
pub fn is_invalid_latitude(y: Option<f64>) -> bool {
    y == Some(INVALID_LATITUDE)
}

/// Overwrite sentinel coordinates using the correction table.
///
/// A row is touched only when its `Y` is the sentinel and its `Address`
/// matches a table entry exactly; `Y` takes the corrected latitude and `X`
/// the corrected longitude. `Address` is left as it was.
pub fn correct_coordinates(df: &mut DataFrame, table: &CorrectionTable) -> Result<CorrectionStats> {
    let addresses = address_values(df)?;
    let mut xs: Vec<Option<f64>> = df.column(X)?.f64()?.into_iter().collect();
    let mut ys: Vec<Option<f64>> = df.column(Y)?.f64()?.into_iter().collect();

    let mut stats = CorrectionStats::default();
    for (row, address) in addresses.iter().enumerate() {
        if !is_invalid_latitude(ys[row]) {
            continue;
        }
        stats.invalid_rows += 1;

        let Some(fix) = address.as_deref().and_then(|a| table.lookup(a)) else {
            continue;
        };
        ys[row] = Some(fix.latitude);
        xs[row] = Some(fix.longitude);
        stats.corrected_rows += 1;
    }

    if stats.corrected_rows > 0 {
        df.with_column(Column::new(X.into(), xs))?;
        df.with_column(Column::new(Y.into(), ys))?;
    }

    Ok(stats)
}

fn address_values(df: &DataFrame) -> Result<Vec<Option<String>>> {
    Ok(df
        .column(ADDRESS)?
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Round a coordinate to [`COORDINATE_DECIMALS`] places.
#[inline]
pub fn round_coordinate(value: f64) -> f64 {
    let scale = 10f64.powi(COORDINATE_DECIMALS);
    (value * scale).round() / scale
}

/// Round `X` and `Y` in place so independently sourced tables compare equal.
pub fn round_coordinates(df: &mut DataFrame) -> Result<()> {
    for name in [X, Y] {
        let rounded: Float64Chunked = df.column(name)?.f64()?.apply_values(round_coordinate);
        df.with_column(rounded.with_name(name.into()).into_series())?;
    }
    Ok(())
}
