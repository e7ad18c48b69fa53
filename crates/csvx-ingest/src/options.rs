//! Configuration options for CSV loading.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Maximum file size for path-based loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Cell tokens treated as missing unless `keep_default_na` is off.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Handling of data rows whose field count differs from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaggedRows {
    /// Fail the load with a parse error.
    #[default]
    Reject,
    /// Pad short rows with missing cells and drop surplus fields.
    Pad,
}

/// Options controlling how a CSV stream becomes a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Ragged row policy.
    pub ragged_rows: RaggedRows,

    /// Extra cell values to treat as missing.
    pub na_values: Vec<String>,

    /// Whether [`DEFAULT_NA_VALUES`] apply. The empty string is always missing.
    pub keep_default_na: bool,

    /// Size limit enforced by path-based loading.
    pub max_file_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            ragged_rows: RaggedRows::default(),
            na_values: Vec::new(),
            keep_default_na: true,
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ragged_rows(mut self, policy: RaggedRows) -> Self {
        self.ragged_rows = policy;
        self
    }

    pub fn with_na_values(mut self, values: Vec<String>) -> Self {
        self.na_values = values;
        self
    }

    pub fn with_keep_default_na(mut self, keep: bool) -> Self {
        self.keep_default_na = keep;
        self
    }

    pub fn with_max_file_size(mut self, max_size: u64) -> Self {
        self.max_file_size = max_size;
        self
    }

    /// Resolves the full set of missing-value tokens.
    pub(crate) fn missing_tokens(&self) -> MissingTokens {
        let mut tokens: HashSet<String> = self.na_values.iter().cloned().collect();
        tokens.insert(String::new());
        if self.keep_default_na {
            tokens.extend(DEFAULT_NA_VALUES.iter().map(|v| (*v).to_string()));
        }
        MissingTokens { tokens }
    }
}

/// Resolved set of cell values that mean "missing".
#[derive(Debug)]
pub(crate) struct MissingTokens {
    tokens: HashSet<String>,
}

impl MissingTokens {
    pub(crate) fn is_missing(&self, value: &str) -> bool {
        self.tokens.contains(value)
    }
}
