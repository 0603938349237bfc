// src/format/mod.rs

//! Turn a raw transaction batch into an analysis-ready one:
//! canonical column names, `date`/`price` renames, numeric prices.

pub mod columns;
pub mod price;

pub use columns::{
    clean_column_names, normalize_column_name, rename_columns, rename_columns_with,
};
pub use price::{format_price_column, parse_price, CURRENCY_PREFIX, PRICE_COLUMN};

use crate::error::FormatError;
use crate::reference::Reference;
use arrow::record_batch::RecordBatch;

/// Format raw data with the built-in reference data.
pub fn format_raw_data(batch: &RecordBatch) -> Result<RecordBatch, FormatError> {
    format_raw_data_with(batch, Reference::builtin())
}

/// Clean names → rename known columns → parse prices, in that order.
#[tracing::instrument(
    level = "debug",
    skip(batch, reference),
    fields(rows = batch.num_rows(), columns = batch.num_columns())
)]
pub fn format_raw_data_with(
    batch: &RecordBatch,
    reference: &Reference,
) -> Result<RecordBatch, FormatError> {
    let cleaned = clean_column_names(batch)?;
    let renamed = rename_columns_with(&cleaned, &reference.column_renames)?;
    format_price_column(&renamed)
}
