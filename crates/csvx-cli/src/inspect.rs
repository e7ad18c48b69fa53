//! Load, validate, and profile a CSV file.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info_span, warn};

use csvx_ingest::{
    CsvLoader, LoadOptions, ValidationResult, ValidationSpec, row_cells, validate,
};
use csvx_report::{ColumnProfile, DataSummary, format_kilobytes, profile_columns, summarize};

use crate::logging::redact_value;

/// Message shown when a file parses to zero data rows.
pub const EMPTY_TABLE_MESSAGE: &str = "The uploaded file appears to be empty.";

/// Name and size of the inspected file.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub size_bytes: u64,
    pub size_label: String,
}

impl FileInfo {
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata =
            std::fs::metadata(path).with_context(|| format!("read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            size_bytes: metadata.len(),
            size_label: format_kilobytes(metadata.len()),
        })
    }
}

/// What to check and how to parse.
#[derive(Debug, Clone, Default)]
pub struct InspectOptions {
    pub load: LoadOptions,
    /// Validation only runs when rules are given.
    pub validation: Option<ValidationSpec>,
}

/// Serializable report for a loaded table.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileInfo>,
    pub summary: DataSummary,
    pub columns: Vec<ColumnProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
}

impl InspectReport {
    /// True when validation ran and failed.
    pub fn failed_validation(&self) -> bool {
        self.validation.as_ref().is_some_and(|v| !v.valid)
    }
}

/// A loaded table together with its report.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub df: DataFrame,
    pub report: InspectReport,
}

/// Loads the file and builds its report.
///
/// A load failure is returned as the underlying `IngestError`, whose
/// message is meant for the user.
pub fn inspect_file(path: &Path, options: &InspectOptions) -> Result<Inspection> {
    let span = info_span!("inspect", path = %path.display());
    let _guard = span.enter();

    let df = CsvLoader::new(options.load.clone()).load_path(path)?;
    let file = FileInfo::from_path(path)?;
    let mut inspection = inspect_table(df, options.validation.as_ref())?;
    inspection.report.file = Some(file);
    Ok(inspection)
}

/// Builds the report for an already loaded table.
pub fn inspect_table(df: DataFrame, rules: Option<&ValidationSpec>) -> Result<Inspection> {
    let validation = rules.map(|spec| validate(&df, spec));
    if let Some(result) = validation.as_ref().filter(|v| !v.valid) {
        warn!(reason = %result.message, "Validation failed");
    }

    if tracing::enabled!(tracing::Level::TRACE) && df.height() > 0 {
        let first = row_cells(&df, 0).context("read first row")?;
        let rendered: Vec<String> = first.iter().map(ToString::to_string).collect();
        tracing::trace!(row = %redact_value(&rendered.join(",")), "First data row");
    }

    let summary = summarize(&df);
    let columns = profile_columns(&df).context("profile columns")?;
    Ok(Inspection {
        df,
        report: InspectReport {
            file: None,
            summary,
            columns,
            validation,
        },
    })
}

/// Reads a JSON rules file into a validation spec.
pub fn read_rules(path: &Path) -> Result<ValidationSpec> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("read rules {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse rules {}", path.display()))
}

/// Combines a rules file with command-line overrides.
///
/// Returns `None` when no rule source was given.
pub fn merge_rules(
    file: Option<ValidationSpec>,
    min_rows: Option<usize>,
    required: &[String],
) -> Option<ValidationSpec> {
    if file.is_none() && min_rows.is_none() && required.is_empty() {
        return None;
    }
    let mut spec = file.unwrap_or_default();
    if let Some(min_rows) = min_rows {
        spec.min_rows = min_rows;
    }
    spec.required_columns.extend(required.iter().cloned());
    Some(spec)
}
