//! Column names and source table kinds shared by every stage

use std::fmt;

use serde::Serialize;

/// Combined timestamp column (derived for truth, native for train/test)
pub const DATES: &str = "Dates";
/// Truth-only date text
pub const DATE: &str = "Date";
/// Truth-only time-of-day text
pub const TIME: &str = "Time";
pub const CATEGORY: &str = "Category";
pub const ADDRESS: &str = "Address";
/// Longitude
pub const X: &str = "X";
/// Latitude
pub const Y: &str = "Y";
/// Authoritative truth identifier
pub const PD_ID: &str = "PdId";
/// Test row identifier
pub const ID: &str = "Id";
pub const RESOLUTION: &str = "Resolution";

/// Which of the three sources a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Truth,
    Train,
    Test,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [TableKind::Truth, TableKind::Train, TableKind::Test];

    /// Columns the raw file must provide for this source.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            TableKind::Truth => &[DATE, TIME, CATEGORY, ADDRESS, X, Y, PD_ID],
            TableKind::Train => &[DATES, CATEGORY, ADDRESS, X, Y, RESOLUTION],
            TableKind::Test => &[ID, DATES, ADDRESS, X, Y],
        }
    }

    /// Raw input file name inside the raw data directory.
    pub fn input_file_name(self) -> &'static str {
        match self {
            TableKind::Truth => "truth.csv",
            TableKind::Train => "train.csv",
            TableKind::Test => "test.csv",
        }
    }

    /// Cleaned output file name inside the output directory.
    pub fn output_file_name(self) -> &'static str {
        match self {
            TableKind::Truth => "truth_clean.csv",
            TableKind::Train => "train_clean.csv",
            TableKind::Test => "test_clean.csv",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Truth => "truth",
            TableKind::Train => "train",
            TableKind::Test => "test",
        };
        f.write_str(name)
    }
}
