// src/format/price.rs

use crate::dataset::{column_index, replace_column};
use crate::error::FormatError;
use arrow::{
    array::{
        Array, ArrayRef, Float64Builder, LargeStringArray, StringArray, StringViewArray,
    },
    datatypes::{DataType, Field},
    record_batch::RecordBatch,
};
use std::{num::ParseFloatError, sync::Arc};
use tracing::debug;

/// Final name of the price column.
pub const PRICE_COLUMN: &str = "price";

/// Currency marker stripped from raw prices.
pub const CURRENCY_PREFIX: &str = "RM";

/// Strip every `RM` and every comma from `raw`, then parse what is left.
///
/// Surrounding whitespace is ignored; anything else left over is an error.
pub fn parse_price(raw: &str) -> Result<f64, ParseFloatError> {
    let stripped = raw.replace(CURRENCY_PREFIX, "").replace(',', "");
    stripped.trim().parse::<f64>()
}

/// Convert the `price` column from formatted strings to `Float64`.
///
/// Nulls stay null. The first unparsable value aborts the whole stage.
pub fn format_price_column(batch: &RecordBatch) -> Result<RecordBatch, FormatError> {
    let idx = column_index(batch, PRICE_COLUMN)
        .ok_or_else(|| FormatError::MissingColumn(PRICE_COLUMN.to_string()))?;
    let schema = batch.schema();
    let matching = schema
        .fields()
        .iter()
        .filter(|f| f.name() == PRICE_COLUMN)
        .count();
    if matching > 1 {
        return Err(FormatError::DuplicateColumn(PRICE_COLUMN.to_string()));
    }
    let field = schema.field(idx);
    let col = batch.column(idx);

    let parsed = match field.data_type() {
        DataType::Utf8 => parse_values(downcast::<StringArray>(col)?.iter())?,
        DataType::LargeUtf8 => parse_values(downcast::<LargeStringArray>(col)?.iter())?,
        DataType::Utf8View => parse_values(downcast::<StringViewArray>(col)?.iter())?,
        other => {
            return Err(FormatError::UnsupportedType {
                column: PRICE_COLUMN.to_string(),
                found: other.clone(),
            })
        }
    };
    debug!(
        rows = parsed.len(),
        nulls = parsed.null_count(),
        "parsed price column"
    );

    let new_field = Field::new(PRICE_COLUMN, DataType::Float64, field.is_nullable())
        .with_metadata(field.metadata().clone());
    Ok(replace_column(batch, idx, new_field, parsed)?)
}

fn downcast<T: Array + 'static>(col: &ArrayRef) -> Result<&T, FormatError> {
    col.as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| FormatError::UnsupportedType {
            column: PRICE_COLUMN.to_string(),
            found: col.data_type().clone(),
        })
}

fn parse_values<'a, I>(values: I) -> Result<ArrayRef, FormatError>
where
    I: Iterator<Item = Option<&'a str>>,
{
    let mut b = Float64Builder::with_capacity(values.size_hint().0);
    for (row, opt) in values.enumerate() {
        match opt {
            Some(raw) => {
                let v = parse_price(raw).map_err(|source| FormatError::Parse {
                    column: PRICE_COLUMN.to_string(),
                    row,
                    value: raw.to_string(),
                    source,
                })?;
                b.append_value(v);
            }
            None => b.append_null(),
        }
    }
    Ok(Arc::new(b.finish()) as ArrayRef)
}
