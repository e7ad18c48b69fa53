//! Row preview window.

use polars::prelude::DataFrame;

/// Smallest preview offered.
pub const PREVIEW_MIN_ROWS: usize = 5;
/// Largest preview offered.
pub const PREVIEW_MAX_ROWS: usize = 100;
/// Preview size when none is requested.
pub const PREVIEW_DEFAULT_ROWS: usize = 10;

/// Clamps a requested preview size to `[5, min(100, total)]`.
///
/// Never exceeds the number of rows available.
pub fn preview_row_count(requested: usize, total: usize) -> usize {
    let upper = PREVIEW_MAX_ROWS.min(total).max(PREVIEW_MIN_ROWS);
    requested.clamp(PREVIEW_MIN_ROWS, upper).min(total)
}

/// Returns the first rows of the table for display.
pub fn preview(df: &DataFrame, requested: usize) -> DataFrame {
    df.head(Some(preview_row_count(requested, df.height())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvx_ingest::load;

    #[test]
    fn test_preview_row_count_bounds() {
        assert_eq!(preview_row_count(PREVIEW_DEFAULT_ROWS, 500), 10);
        assert_eq!(preview_row_count(1, 500), 5);
        assert_eq!(preview_row_count(1000, 500), 100);
        assert_eq!(preview_row_count(50, 20), 20);
    }

    #[test]
    fn test_preview_row_count_small_tables() {
        assert_eq!(preview_row_count(10, 3), 3);
        assert_eq!(preview_row_count(10, 0), 0);
    }

    #[test]
    fn test_preview_head() {
        let mut content = String::from("n");
        for i in 0..30 {
            content.push_str(&format!("\n{i}"));
        }
        let df = load(content.as_bytes()).unwrap();
        assert_eq!(preview(&df, PREVIEW_DEFAULT_ROWS).height(), 10);
        assert_eq!(preview(&df, 2).height(), 5);
    }
}
