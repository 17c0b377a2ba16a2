//! Error types for the cleaning pipeline.
//!
//! These cover the domain failures that abort a run. I/O and polars errors are
//! carried through `anyhow` with context instead.

use thiserror::Error;

use super::schema::TableKind;

/// Fatal conditions detected while loading or normalizing a source table.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A timestamp could not be parsed with any accepted layout.
    #[error("{table} table: malformed timestamp {value:?} at row {row}")]
    MalformedTimestamp {
        table: TableKind,
        /// Zero-based data row
        row: usize,
        value: String,
    },

    /// A column required by a pipeline stage is absent.
    #[error("{table} table: required column '{column}' not found")]
    MissingColumn { table: TableKind, column: String },

    /// An `X`/`Y` value is not a number.
    #[error("{table} table: column '{column}' contains non-numeric coordinates")]
    InvalidCoordinate { table: TableKind, column: String },

    /// The `Id` column of the test table is not an integer.
    #[error("{table} table: column '{column}' contains non-integer identifiers")]
    InvalidIdentifier { table: TableKind, column: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_timestamp_message_names_table_and_row() {
        let err = PipelineError::MalformedTimestamp {
            table: TableKind::Truth,
            row: 3,
            value: "yesterday".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("truth"), "{}", msg);
        assert!(msg.contains("row 3"), "{}", msg);
        assert!(msg.contains("yesterday"), "{}", msg);
    }

    #[test]
    fn test_missing_column_message() {
        let err = PipelineError::MissingColumn {
            table: TableKind::Test,
            column: "Id".to_string(),
        };
        assert_eq!(err.to_string(), "test table: required column 'Id' not found");
    }
}
