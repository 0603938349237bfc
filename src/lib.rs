//! Validation and formatting of raw property-transaction batches.
//!
//! Callers validate a raw Arrow batch first ([`validate_raw_data`]) and then
//! format it ([`format_raw_data`]) into canonical column names with a numeric
//! `price` column. Every step returns a new batch.

pub mod dataset;
pub mod error;
pub mod format;
pub mod reference;
pub mod validate;

pub use error::{FormatError, ValidationError};
pub use format::{format_raw_data, format_raw_data_with};
pub use reference::Reference;
pub use validate::{validate_raw_data, validate_raw_data_with};
