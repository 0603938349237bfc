// src/format/columns.rs

use crate::dataset::{duplicate_column, map_field_names};
use crate::error::FormatError;
use crate::reference::Reference;
use arrow::record_batch::RecordBatch;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Canonical form of a raw column name.
///
/// Steps run in this order: trim, spaces to `_`, lowercase, drop commas,
/// `/` to `_or_`. Nothing else in the name is touched.
pub fn normalize_column_name(raw: &str) -> String {
    let name = raw.trim();
    let name = name.replace(' ', "_");
    let name = name.to_lowercase();
    let name = name.replace(',', "");
    name.replace('/', "_or_")
}

/// Normalize every column name of `batch`.
///
/// Fails if two raw names collapse to the same canonical name.
pub fn clean_column_names(batch: &RecordBatch) -> Result<RecordBatch, FormatError> {
    let out = map_field_names(batch, normalize_column_name)?;
    ensure_unique_names(&out)?;
    Ok(out)
}

/// Rename normalized columns using the built-in rename map.
pub fn rename_columns(batch: &RecordBatch) -> Result<RecordBatch, FormatError> {
    rename_columns_with(batch, &Reference::builtin().column_renames)
}

/// Rename every column whose name is a key of `renames`; the rest keep theirs.
pub fn rename_columns_with(
    batch: &RecordBatch,
    renames: &BTreeMap<String, String>,
) -> Result<RecordBatch, FormatError> {
    let out = map_field_names(batch, |name| match renames.get(name) {
        Some(target) => {
            debug!(from = name, to = %target, "renaming column");
            target.clone()
        }
        None => name.to_string(),
    })?;
    ensure_unique_names(&out)?;
    Ok(out)
}

fn ensure_unique_names(batch: &RecordBatch) -> Result<(), FormatError> {
    match duplicate_column(batch) {
        Some(name) => {
            warn!(column = %name, "column name is not unique");
            Err(FormatError::DuplicateColumn(name))
        }
        None => Ok(()),
    }
}
