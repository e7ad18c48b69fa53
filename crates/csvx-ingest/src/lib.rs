//! CSV ingestion for the CSV explorer.
//!
//! This crate turns an uploaded CSV stream into a Polars DataFrame and
//! checks it against structural requirements.
//!
//! # Features
//!
//! - **Loading**: single-shot parse with classified errors
//!   (`EmptyInput`, `ParseFailure`, `Unexpected`)
//! - **Column Typing**: one dtype per column by majority of its cells
//! - **Validation**: minimum row count and required columns
//! - **Table Helpers**: typed cell extraction for reports and renderers
//!
//! # Example
//!
//! ```ignore
//! use csvx_ingest::{ValidationSpec, load, validate};
//!
//! let df = load("name,age\nJohn,25\n".as_bytes())?;
//! let verdict = validate(&df, &ValidationSpec::new().with_required_columns(["name"]));
//! assert!(verdict.valid);
//! ```

mod error;
mod loader;
mod options;
mod table;
mod validate;

// === Error Types ===
pub use error::{ErrorKind, IngestError, Result};

// === Loading ===
pub use loader::{
    ColumnType, CsvHeaders, CsvLoader, build_column, check_file_size_with_limit,
    detect_utf16_bom, infer_column_type, load, load_path,
};
pub use options::{DEFAULT_NA_VALUES, LoadOptions, MAX_CSV_FILE_SIZE, RaggedRows};

// === Table Helpers ===
pub use table::{
    CellValue, TIMESTAMP_FORMAT, TIMESTAMP_MILLIS_FORMAT, column_cells, column_names, row_cells,
    row_count,
};

// === Validation ===
pub use validate::{ValidationResult, ValidationSpec, validate};
