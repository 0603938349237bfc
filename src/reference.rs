// src/reference.rs

//! Reference data for raw property-transaction extracts: the exact raw column
//! layout, which column carries the transaction date, and the canonical names
//! that two of the normalized columns are renamed to.

use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::Path,
};
use tracing::debug;

/// Raw column names, in file order, exactly as the source extract spells them.
pub const EXPECTED_RAW_COLUMNS: [&str; 11] = [
    "Property Type",
    "District",
    "Mukim",
    "Scheme Name/Area",
    "Road Name",
    "Month, Year of Transaction Date",
    "Tenure",
    "Land/Parcel Area",
    "Main Floor Area",
    "Unit Level",
    "Transaction Price",
];

/// The raw column that must already hold timestamps.
pub const DATE_COLUMN: &str = "Month, Year of Transaction Date";

/// Normalized name → final name.
pub const COLUMN_RENAMES: [(&str, &str); 2] = [
    ("month_year_of_transaction_date", "date"),
    ("transaction_price", "price"),
];

static BUILTIN: Lazy<Reference> = Lazy::new(|| Reference {
    expected_raw_columns: EXPECTED_RAW_COLUMNS.iter().map(|s| s.to_string()).collect(),
    date_column: DATE_COLUMN.to_string(),
    column_renames: COLUMN_RENAMES
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect(),
});

/// Read-only reference data shared by validation and formatting.
///
/// Fields missing from a loaded file fall back to the built-in values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub expected_raw_columns: Vec<String>,
    pub date_column: String,
    pub column_renames: BTreeMap<String, String>,
}

impl Default for Reference {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl Reference {
    /// The compiled-in reference data.
    pub fn builtin() -> &'static Reference {
        &BUILTIN
    }

    /// Parse reference data from YAML and check it.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let reference: Reference =
            serde_yaml::from_str(text).context("parsing reference data as YAML")?;
        reference.check()?;
        Ok(reference)
    }

    /// Parse reference data from JSON and check it.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let reference: Reference =
            serde_json::from_str(text).context("parsing reference data as JSON")?;
        reference.check()?;
        Ok(reference)
    }

    /// Load reference data from `path`; `.json` files are read as JSON,
    /// anything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
        let is_json = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let reference = if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
        .with_context(|| format!("loading reference data from {:?}", path))?;

        debug!(
            columns = reference.expected_raw_columns.len(),
            renames = reference.column_renames.len(),
            "loaded reference data from {}",
            path.display()
        );
        Ok(reference)
    }

    /// Reject reference data that could never validate or rename consistently.
    pub fn check(&self) -> Result<()> {
        if self.expected_raw_columns.is_empty() {
            bail!("expected_raw_columns must not be empty");
        }

        let mut seen = HashSet::with_capacity(self.expected_raw_columns.len());
        for name in &self.expected_raw_columns {
            if !seen.insert(name.as_str()) {
                bail!("expected column `{}` is listed more than once", name);
            }
        }

        if !seen.contains(self.date_column.as_str()) {
            return Err(anyhow!(
                "date column `{}` is not one of the expected columns",
                self.date_column
            ));
        }

        let mut targets = HashSet::with_capacity(self.column_renames.len());
        for (from, to) in &self.column_renames {
            if !targets.insert(to.as_str()) {
                bail!("rename of `{}` collides on target `{}`", from, to);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_reference_passes_its_own_check() -> Result<()> {
        let reference = Reference::builtin();
        reference.check()?;
        assert_eq!(reference.expected_raw_columns.len(), EXPECTED_RAW_COLUMNS.len());
        assert_eq!(
            reference.column_renames.get("transaction_price").map(String::as_str),
            Some("price")
        );
        assert_eq!(
            reference
                .column_renames
                .get("month_year_of_transaction_date")
                .map(String::as_str),
            Some("date")
        );
        assert_eq!(&Reference::default(), reference);
        Ok(())
    }

    #[test]
    fn yaml_overrides_columns_and_keeps_builtin_renames() -> Result<()> {
        let text = r#"
expected_raw_columns:
  - "Month, Year of Transaction Date"
  - "Transaction Price"
"#;
        let reference = Reference::from_yaml_str(text)?;
        assert_eq!(
            reference.expected_raw_columns,
            vec!["Month, Year of Transaction Date", "Transaction Price"]
        );
        assert_eq!(reference.date_column, DATE_COLUMN);
        assert_eq!(reference.column_renames.len(), 2);
        Ok(())
    }

    #[test]
    fn date_column_must_be_expected() {
        let text = r#"
expected_raw_columns: ["District", "Transaction Price"]
"#;
        let err = Reference::from_yaml_str(text).unwrap_err();
        assert!(format!("{:#}", err).contains("is not one of the expected columns"));
    }

    #[test]
    fn duplicate_expected_columns_are_rejected() {
        let reference = Reference {
            expected_raw_columns: vec![DATE_COLUMN.into(), DATE_COLUMN.into()],
            ..Reference::default()
        };
        assert!(reference.check().is_err());
    }

    #[test]
    fn colliding_rename_targets_are_rejected() {
        let mut reference = Reference::default();
        reference
            .column_renames
            .insert("price_or_sqft".into(), "price".into());
        let err = reference.check().unwrap_err();
        assert!(err.to_string().contains("collides on target `price`"));
    }

    #[test]
    fn load_reads_json_by_extension() -> Result<()> {
        let mut tmp = tempfile::Builder::new().suffix(".json").tempfile()?;
        write!(
            tmp,
            r#"{{"expected_raw_columns": ["Tenure", "{}"], "column_renames": {{}}}}"#,
            DATE_COLUMN
        )?;
        let reference = Reference::load(tmp.path())?;
        assert_eq!(reference.expected_raw_columns, vec!["Tenure", DATE_COLUMN]);
        assert!(reference.column_renames.is_empty());
        Ok(())
    }

    #[test]
    fn load_reads_yaml_otherwise() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "date_column: Tenure")?;
        writeln!(tmp, "expected_raw_columns: [Tenure]")?;
        let reference = Reference::load(tmp.path())?;
        assert_eq!(reference.date_column, "Tenure");
        Ok(())
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Reference::load("/nonexistent/reference.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("reading"));
    }
}
