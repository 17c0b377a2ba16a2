//! Shared test utilities and fixture generators
//!
//! The fixtures mirror the three raw sources: truth carries `Date`/`Time`,
//! `PdId` and comma-separated categories; train and test carry `Dates`.

#![allow(dead_code)]

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crimekey::pipeline::read_raw_csv;

/// Raw truth table.
///
/// - row 0: WARRANTS at OAK ST / LAGUNA ST
/// - row 1: "LARCENY, THEFT" at a sentinel address that has a curated correction
/// - rows 2-3: two incidents at the same time and place (ASSAULT, OTHER OFFENSES)
/// - row 4: sentinel address with no correction
pub fn raw_truth() -> DataFrame {
    df! {
        "IncidntNum" => ["150420630", "150421190", "150421282", "150421283", "150421400"],
        "Category" => ["WARRANTS", "LARCENY, THEFT", "ASSAULT", "OTHER OFFENSES", "VANDALISM"],
        "Descript" => [
            "WARRANT ARREST",
            "GRAND THEFT FROM LOCKED AUTO",
            "BATTERY",
            "TRAFFIC VIOLATION",
            "MALICIOUS MISCHIEF, VANDALISM",
        ],
        "DayOfWeek" => ["Wednesday", "Wednesday", "Wednesday", "Wednesday", "Tuesday"],
        "Date" => ["05/13/2015", "05/13/2015", "05/13/2015", "05/13/2015", "05/12/2015"],
        "Time" => ["23:53", "23:33", "23:30", "23:30", "08:15"],
        "PdDistrict" => ["NORTHERN", "SOUTHERN", "MISSION", "MISSION", "BAYVIEW"],
        "Resolution" => ["ARREST, BOOKED", "NONE", "NONE", "ARREST, CITED", "NONE"],
        "Address" => [
            "OAK ST / LAGUNA ST",
            "BRANNAN ST / 1ST ST",
            "16TH ST / MISSION ST",
            "16TH ST / MISSION ST",
            "NOWHERE ST / ELSEWHERE AV",
        ],
        "X" => ["-122.425891675136", "-120.5", "-122.419671780296", "-122.419671780296", "-120.5"],
        "Y" => ["37.7745985956747", "90", "37.7650501214668", "37.7650501214668", "90"],
        "Location" => [
            "(37.7745985956747, -122.425891675136)",
            "(90, -120.5)",
            "(37.7650501214668, -122.419671780296)",
            "(37.7650501214668, -122.419671780296)",
            "(90, -120.5)",
        ],
        "PdId" => ["15042063063010", "15042119006244", "15042128204134", "15042128365016", "15042140028150"],
    }
    .unwrap()
}

/// Raw train table; every row matches exactly one truth row.
///
/// Addresses and resolutions deliberately differ from truth, and coordinates
/// differ beyond the sixth decimal.
pub fn raw_train() -> DataFrame {
    df! {
        "Dates" => ["2015-05-13 23:53:00", "2015-05-13 23:33:00", "2015-05-13 23:30:00"],
        "Category" => ["WARRANTS", "LARCENY THEFT", "ASSAULT"],
        "Descript" => ["WARRANT ARREST", "GRAND THEFT FROM LOCKED AUTO", "BATTERY"],
        "DayOfWeek" => ["Wednesday", "Wednesday", "Wednesday"],
        "PdDistrict" => ["NORTHERN", "SOUTHERN", "MISSION"],
        "Resolution" => ["ARREST, BOOKED", "NONE", "NONE"],
        "Address" => ["LAGUNA ST / OAK ST", "BRANNAN ST / 1ST ST", "MISSION ST / 16TH ST"],
        "X" => ["-122.4258916", "-120.5", "-122.4196718"],
        "Y" => ["37.77459860", "90", "37.76505012"],
    }
    .unwrap()
}

/// Raw train table with one extra row that has no truth counterpart.
pub fn raw_train_with_orphan() -> DataFrame {
    let orphan = df! {
        "Dates" => ["2015-05-10 12:00:00"],
        "Category" => ["ROBBERY"],
        "Descript" => ["ROBBERY ON THE STREET, STRONGARM"],
        "DayOfWeek" => ["Sunday"],
        "PdDistrict" => ["TENDERLOIN"],
        "Resolution" => ["NONE"],
        "Address" => ["TURK ST / TAYLOR ST"],
        "X" => ["-122.410541166987"],
        "Y" => ["37.7830037964534"],
    }
    .unwrap();
    raw_train().vstack(&orphan).unwrap()
}

/// Raw test table.
///
/// - Id 0 matches the WARRANTS truth row
/// - Id 1 matches both MISSION truth rows (ASSAULT and OTHER OFFENSES)
/// - Id 2 is a sentinel row whose address has no correction and no truth match
/// - Id 3 matches the corrected LARCENY THEFT truth row
pub fn raw_test() -> DataFrame {
    df! {
        "Id" => ["0", "1", "2", "3"],
        "Dates" => [
            "2015-05-13 23:53:00",
            "2015-05-13 23:30:00",
            "2015-05-12 08:15:00",
            "2015-05-13 23:33:00",
        ],
        "DayOfWeek" => ["Wednesday", "Wednesday", "Tuesday", "Wednesday"],
        "PdDistrict" => ["NORTHERN", "MISSION", "INGLESIDE", "SOUTHERN"],
        "Address" => [
            "OAK ST / LAGUNA ST",
            "16TH ST / MISSION ST",
            "NOWHERE ST / ELSEWHERE AV",
            "BRANNAN ST / 1ST ST",
        ],
        "X" => ["-122.425891675136", "-122.419671780296", "-120.5", "-120.5"],
        "Y" => ["37.7745985956747", "37.7650501214668", "90", "90"],
    }
    .unwrap()
}

/// Write a DataFrame as CSV to `path`.
pub fn write_raw(df: &mut DataFrame, path: &Path) {
    let mut file = std::fs::File::create(path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
}

/// Create a temporary workspace with `raw_data/{truth,train,test}.csv`.
///
/// Returns the temp dir, the raw directory and the (not yet created) output directory.
pub fn create_raw_workspace(
    truth: &mut DataFrame,
    train: &mut DataFrame,
    test: &mut DataFrame,
) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let raw_dir = temp_dir.path().join("raw_data");
    std::fs::create_dir_all(&raw_dir).unwrap();

    write_raw(truth, &raw_dir.join("truth.csv"));
    write_raw(train, &raw_dir.join("train.csv"));
    write_raw(test, &raw_dir.join("test.csv"));

    let output_dir = temp_dir.path().join("processed_data");
    (temp_dir, raw_dir, output_dir)
}

/// Workspace with the default fixtures.
pub fn create_default_workspace() -> (TempDir, PathBuf, PathBuf) {
    create_raw_workspace(&mut raw_truth(), &mut raw_train(), &mut raw_test())
}

/// Read an output CSV back with every column as a string.
pub fn read_output(path: &Path) -> DataFrame {
    read_raw_csv(path).unwrap()
}

/// String values of a column.
pub fn strings(df: &DataFrame, column: &str) -> Vec<Option<String>> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

/// Float values of a string column.
pub fn floats(df: &DataFrame, column: &str) -> Vec<f64> {
    strings(df, column)
        .into_iter()
        .map(|v| v.unwrap().parse::<f64>().unwrap())
        .collect()
}

/// Assert that a DataFrame has exactly these columns, in order.
pub fn assert_columns(df: &DataFrame, expected: &[&str]) {
    let actual: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    assert_eq!(actual, expected, "Column mismatch");
}

/// Number of digits after the decimal point in a formatted number.
pub fn decimal_places(text: &str) -> usize {
    text.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0)
}
