// src/validate.rs

use crate::error::ValidationError;
use crate::reference::Reference;
use arrow::{
    datatypes::{DataType, Schema},
    record_batch::RecordBatch,
};
use tracing::{debug, warn};

/// Column names with surrounding whitespace removed, in order.
pub fn trimmed_column_names(schema: &Schema) -> Vec<String> {
    schema
        .fields()
        .iter()
        .map(|f| f.name().trim().to_string())
        .collect()
}

/// Validate a raw batch against the built-in reference data.
pub fn validate_raw_data(batch: &RecordBatch) -> Result<(), ValidationError> {
    validate_raw_data_with(batch, Reference::builtin())
}

/// Check that the trimmed column names equal `reference.expected_raw_columns`
/// element for element, then that the date column holds timestamps.
#[tracing::instrument(
    level = "debug",
    skip(batch, reference),
    fields(rows = batch.num_rows(), columns = batch.num_columns())
)]
pub fn validate_raw_data_with(
    batch: &RecordBatch,
    reference: &Reference,
) -> Result<(), ValidationError> {
    let schema = batch.schema();
    let columns = trimmed_column_names(&schema);

    if columns != reference.expected_raw_columns {
        warn!(
            actual = columns.len(),
            expected = reference.expected_raw_columns.len(),
            "raw columns do not match the expected structure"
        );
        return Err(ValidationError::SchemaMismatch {
            actual: columns,
            expected: reference.expected_raw_columns.clone(),
        });
    }

    // names matched, so the date column sits at the same position
    let idx = columns
        .iter()
        .position(|c| *c == reference.date_column)
        .ok_or_else(|| ValidationError::DateColumnNotExpected(reference.date_column.clone()))?;

    let found = schema.field(idx).data_type();
    if !matches!(found, DataType::Timestamp(_, _)) {
        warn!(column = %reference.date_column, %found, "date column is not a timestamp");
        return Err(ValidationError::TypeMismatch {
            column: reference.date_column.clone(),
            found: found.clone(),
        });
    }

    debug!("raw data passed validation");
    Ok(())
}
