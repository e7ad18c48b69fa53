//! CSV loading: header normalization, column typing, and loading.

mod header;
mod infer;
mod reader;

pub use header::CsvHeaders;
pub use infer::{ColumnType, build_column, infer_column_type};
pub use reader::{CsvLoader, check_file_size_with_limit, detect_utf16_bom, load, load_path};
