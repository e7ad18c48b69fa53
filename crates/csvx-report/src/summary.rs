//! Dataset and column statistics.

use polars::prelude::{Column, DataFrame};
use serde::Serialize;

use crate::error::Result;

/// Headline numbers for a loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSummary {
    pub rows: usize,
    pub columns: usize,
    /// Estimated in-memory size of the table.
    pub memory_bytes: usize,
    /// Missing cells across all columns.
    pub missing_values: usize,
}

impl DataSummary {
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn memory_label(&self) -> String {
        format_kilobytes(self.memory_bytes as u64)
    }
}

/// Per-column statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
    pub nulls: usize,
    /// Distinct non-null values.
    pub unique: usize,
}

/// Builds the dataset summary.
pub fn summarize(df: &DataFrame) -> DataSummary {
    DataSummary {
        rows: df.height(),
        columns: df.width(),
        memory_bytes: df.estimated_size(),
        missing_values: df.get_columns().iter().map(Column::null_count).sum(),
    }
}

/// Builds one profile per column, in table order.
pub fn profile_columns(df: &DataFrame) -> Result<Vec<ColumnProfile>> {
    df.get_columns().iter().map(profile_column).collect()
}

fn profile_column(col: &Column) -> Result<ColumnProfile> {
    let nulls = col.null_count();
    let non_null = col.len() - nulls;

    // n_unique counts null as a value of its own
    let distinct = col.n_unique()?;
    let unique = if nulls > 0 {
        distinct.saturating_sub(1)
    } else {
        distinct
    };

    Ok(ColumnProfile {
        name: col.name().to_string(),
        dtype: col.dtype().to_string(),
        non_null,
        nulls,
        unique,
    })
}

/// Formats a byte count as kilobytes with one decimal.
pub fn format_kilobytes(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
