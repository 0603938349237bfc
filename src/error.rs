// src/error.rs

use arrow::{datatypes::DataType, error::ArrowError};
use std::num::ParseFloatError;
use thiserror::Error;

/// Why a raw dataset was rejected before formatting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("the columns do not match the established column structure {actual:?}. Expected: {expected:?}")]
    SchemaMismatch {
        actual: Vec<String>,
        expected: Vec<String>,
    },

    #[error("`{column}` must be a datetime type, found {found}")]
    TypeMismatch { column: String, found: DataType },

    #[error("date column `{0}` is not one of the expected columns")]
    DateColumnNotExpected(String),
}

/// Failures raised by the formatting stages.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("column `{0}` not found")]
    MissingColumn(String),

    #[error("column `{0}` appears more than once")]
    DuplicateColumn(String),

    #[error("column `{column}` must hold strings, found {found}")]
    UnsupportedType { column: String, found: DataType },

    #[error("could not parse `{value}` in column `{column}` at row {row} as a number: {source}")]
    Parse {
        column: String,
        row: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("rebuilding record batch: {0}")]
    Arrow(#[from] ArrowError),
}
