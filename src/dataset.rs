// src/dataset.rs

//! Helpers that rebuild a `RecordBatch` around new field names or a single
//! replaced column. Untouched columns keep sharing their buffers with the input.

use arrow::{
    array::ArrayRef,
    datatypes::{Field, FieldRef, Schema},
    error::ArrowError,
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::{collections::HashSet, sync::Arc};

/// Column names of `batch`, in order.
pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}

/// Index of the column called `name`, if any.
pub fn column_index(batch: &RecordBatch, name: &str) -> Option<usize> {
    batch.schema().fields().iter().position(|f| f.name() == name)
}

/// First column name that appears more than once in `batch`, if any.
pub fn duplicate_column(batch: &RecordBatch) -> Option<String> {
    let schema = batch.schema();
    let mut seen = HashSet::with_capacity(schema.fields().len());
    schema
        .fields()
        .iter()
        .map(|f| f.name())
        .find(|name| !seen.insert(*name))
        .cloned()
}

/// Rebuild `batch` with each field renamed by `rename`; types, nullability,
/// metadata and data are carried over.
pub fn map_field_names<F>(batch: &RecordBatch, mut rename: F) -> Result<RecordBatch, ArrowError>
where
    F: FnMut(&str) -> String,
{
    let schema = batch.schema();
    let fields: Vec<FieldRef> = schema
        .fields()
        .iter()
        .map(|f| Arc::new(f.as_ref().clone().with_name(rename(f.name()))))
        .collect();
    let new_schema = Schema::new_with_metadata(fields, schema.metadata().clone());

    rebuild(batch, new_schema, batch.columns().to_vec())
}

/// Rebuild `batch` with the column at `idx` swapped for `array` under `field`.
pub fn replace_column(
    batch: &RecordBatch,
    idx: usize,
    field: Field,
    array: ArrayRef,
) -> Result<RecordBatch, ArrowError> {
    let schema = batch.schema();
    let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
    let mut columns = batch.columns().to_vec();
    fields[idx] = Arc::new(field);
    columns[idx] = array;

    let new_schema = Schema::new_with_metadata(fields, schema.metadata().clone());
    rebuild(batch, new_schema, columns)
}

// Row count is passed explicitly so zero-column batches survive the rebuild.
fn rebuild(
    batch: &RecordBatch,
    schema: Schema,
    columns: Vec<ArrayRef>,
) -> Result<RecordBatch, ArrowError> {
    let options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
    RecordBatch::try_new_with_options(Arc::new(schema), columns, &options)
}
