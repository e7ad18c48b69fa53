//! Single-shot CSV loading into a Polars DataFrame.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};
use crate::options::{LoadOptions, RaggedRows};

use super::header::CsvHeaders;
use super::infer::{build_column, infer_column_type};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Loads CSV streams with a fixed set of [`LoadOptions`].
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    options: LoadOptions,
}

impl CsvLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Reads the whole stream and parses it.
    ///
    /// Every failure is classified into one of the three [`IngestError`]
    /// kinds; nothing else escapes.
    pub fn load<R: Read>(&self, mut reader: R) -> Result<DataFrame> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.load_bytes(&bytes)
    }

    pub fn load_str(&self, content: &str) -> Result<DataFrame> {
        self.load_bytes(content.as_bytes())
    }

    pub fn load_bytes(&self, bytes: &[u8]) -> Result<DataFrame> {
        if let Some(encoding) = detect_utf16_bom(bytes) {
            return Err(IngestError::unexpected(format!(
                "unsupported encoding {encoding}; save the file as UTF-8"
            )));
        }
        let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        if content.iter().all(u8::is_ascii_whitespace) {
            return Err(IngestError::EmptyInput);
        }
        self.parse(content)
    }

    /// Loads a file from disk after size and encoding checks.
    pub fn load_path(&self, path: &Path) -> Result<DataFrame> {
        check_file_size_with_limit(path, self.options.max_file_size)?;
        let file = File::open(path).map_err(|e| open_error(path, &e))?;
        let df = self.load(BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "Loaded CSV file"
        );
        Ok(df)
    }

    fn parse(&self, content: &[u8]) -> Result<DataFrame> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content);
        let mut records = reader.records();

        let headers = match records.next() {
            None => return Err(IngestError::EmptyInput),
            Some(record) => CsvHeaders::from_fields(record?.iter()),
        };
        if headers.renamed > 0 {
            tracing::debug!(renamed = headers.renamed, "Normalized header names");
        }

        let missing = self.options.missing_tokens();
        let width = headers.len();
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
        let mut padded = 0usize;

        for record in records {
            let record = record?;
            // Whitespace-only lines are skipped like empty ones
            if width > 1 && is_whitespace_record(&record) {
                continue;
            }
            if record.len() != width {
                let line = record.position().map_or(0, csv::Position::line);
                match self.options.ragged_rows {
                    RaggedRows::Reject => {
                        return Err(IngestError::parse(format!(
                            "Expected {width} fields in line {line}, saw {}",
                            record.len()
                        )));
                    }
                    RaggedRows::Pad => padded += 1,
                }
            }
            for (idx, column) in cells.iter_mut().enumerate() {
                let value = record
                    .get(idx)
                    .filter(|value| !missing.is_missing(value))
                    .map(str::to_string);
                column.push(value);
            }
        }
        if padded > 0 {
            tracing::warn!(rows = padded, "Padded or truncated ragged rows");
        }

        let mut columns = Vec::with_capacity(width);
        for (name, values) in headers.columns.iter().zip(&cells) {
            let view: Vec<Option<&str>> = values.iter().map(Option::as_deref).collect();
            let ty = infer_column_type(&view);
            tracing::trace!(column = %name, ?ty, "Inferred column type");
            columns.push(build_column(name, &view, ty)?);
        }

        Ok(DataFrame::new(columns)?)
    }
}

fn is_whitespace_record(record: &csv::StringRecord) -> bool {
    record.len() == 1 && record.iter().all(|field| field.trim().is_empty())
}

/// Loads a CSV stream with default options.
pub fn load<R: Read>(reader: R) -> Result<DataFrame> {
    CsvLoader::default().load(reader)
}

/// Loads a CSV file with default options.
pub fn load_path(path: &Path) -> Result<DataFrame> {
    CsvLoader::default().load_path(path)
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, &e))?;

    if metadata.len() > max_size {
        return Err(IngestError::unexpected(format!(
            "file too large: {} ({} bytes, limit {max_size})",
            path.display(),
            metadata.len()
        )));
    }

    Ok(())
}

/// Returns the name of a UTF-16 encoding when the bytes start with its BOM.
pub fn detect_utf16_bom(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xFE, ..] => Some("UTF-16 LE"),
        [0xFE, 0xFF, ..] => Some("UTF-16 BE"),
        _ => None,
    }
}

fn open_error(path: &Path, err: &std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::unexpected(format!("file not found: {}", path.display()))
    } else {
        IngestError::unexpected(format!("failed to read file {}: {err}", path.display()))
    }
}
