//! Reporting for loaded CSV tables.
//!
//! - [`summary`]: row/column counts, memory footprint, missing values, and
//!   per-column dtype and cardinality
//! - [`preview`]: bounded head-of-table window
//! - [`explorer`]: handoff to the interactive explorer with a static fallback

mod error;
mod html;

pub mod explorer;
pub mod preview;
pub mod summary;

pub use error::{ReportError, Result};
pub use explorer::{
    DEFAULT_EXPLORER_CONFIG, ExplorerRenderer, InteractiveRenderer, RenderedExplorer,
    StaticRenderer, explorer_payload, render_with_fallback,
};
pub use preview::{
    PREVIEW_DEFAULT_ROWS, PREVIEW_MAX_ROWS, PREVIEW_MIN_ROWS, preview, preview_row_count,
};
pub use summary::{ColumnProfile, DataSummary, format_kilobytes, profile_columns, summarize};
