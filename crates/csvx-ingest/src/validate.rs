//! Structural validation of a loaded table.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Structural requirements a table must meet.
///
/// Both fields are optional when deserialized from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSpec {
    /// Minimum number of data rows.
    #[serde(default = "default_min_rows")]
    pub min_rows: usize,

    /// Column names that must be present.
    #[serde(default)]
    pub required_columns: BTreeSet<String>,
}

fn default_min_rows() -> usize {
    1
}

impl Default for ValidationSpec {
    fn default() -> Self {
        Self {
            min_rows: default_min_rows(),
            required_columns: BTreeSet::new(),
        }
    }
}

impl ValidationSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = min_rows;
        self
    }

    pub fn with_required_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

/// Verdict of [`validate`]. The message is empty when valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Checks row count first, then required columns; the first failure wins.
pub fn validate(df: &DataFrame, spec: &ValidationSpec) -> ValidationResult {
    let rows = df.height();
    if rows < spec.min_rows {
        return ValidationResult::fail(format!(
            "CSV must have minimum {} rows, but has {rows}",
            spec.min_rows
        ));
    }

    let present: BTreeSet<&str> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    let missing: Vec<&str> = spec
        .required_columns
        .iter()
        .map(String::as_str)
        .filter(|name| !present.contains(name))
        .collect();
    if !missing.is_empty() {
        return ValidationResult::fail(format!(
            "Missing required columns: {}",
            missing.join(", ")
        ));
    }

    ValidationResult::pass()
}
