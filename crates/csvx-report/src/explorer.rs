//! Handoff of a loaded table to the interactive explorer.
//!
//! Rendering is a two-path strategy: the interactive renderer needs its
//! widget configuration and may fail; the static renderer only needs the
//! table. [`render_with_fallback`] tries the first and substitutes the
//! second on any failure, using the same DataFrame.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use csvx_ingest::{CellValue, column_cells, column_names};
use polars::prelude::DataFrame;
use serde_json::{Map, Value, json};

use crate::error::{ReportError, Result};
use crate::html::{embed_json, escape_html, page};

/// Widget configuration file looked up when none is given.
pub const DEFAULT_EXPLORER_CONFIG: &str = "gw_config.json";

/// Something that can turn a table into an explorer page.
pub trait ExplorerRenderer {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Renders a complete HTML document for the table.
    fn render(&self, df: &DataFrame) -> Result<String>;
}

/// Embeds the table and the widget configuration for the interactive explorer.
#[derive(Debug, Clone)]
pub struct InteractiveRenderer {
    config_path: PathBuf,
}

impl InteractiveRenderer {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads and parses the widget configuration.
    pub fn load_config(&self) -> Result<Value> {
        let raw = std::fs::read_to_string(&self.config_path).map_err(|source| {
            ReportError::ConfigRead {
                path: self.config_path.clone(),
                source,
            }
        })?;
        serde_json::from_str(&raw).map_err(|source| ReportError::ConfigParse {
            path: self.config_path.clone(),
            source,
        })
    }
}

impl Default for InteractiveRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_EXPLORER_CONFIG)
    }
}

impl ExplorerRenderer for InteractiveRenderer {
    fn name(&self) -> &'static str {
        "interactive"
    }

    fn render(&self, df: &DataFrame) -> Result<String> {
        let config = self.load_config()?;
        let payload = explorer_payload(df)?;

        let mut body = String::new();
        body.push_str("<div id=\"explorer\"></div>\n");
        let _ = writeln!(
            body,
            "<script id=\"explorer-config\" type=\"application/json\">{}</script>",
            embed_json(&serde_json::to_string(&config)?)
        );
        let _ = writeln!(
            body,
            "<script id=\"explorer-data\" type=\"application/json\">{}</script>",
            embed_json(&serde_json::to_string(&payload)?)
        );

        tracing::debug!(
            config = %self.config_path.display(),
            rows = df.height(),
            "Rendered interactive explorer"
        );
        Ok(page("CSV Explorer", "", &body))
    }
}

/// Plain HTML table; works without any widget configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticRenderer {
    /// Upper bound on rendered rows (all rows when `None`).
    pub max_rows: Option<usize>,
}

impl StaticRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

impl ExplorerRenderer for StaticRenderer {
    fn name(&self) -> &'static str {
        "static"
    }

    fn render(&self, df: &DataFrame) -> Result<String> {
        let shown = match self.max_rows {
            Some(limit) => df.head(Some(limit)),
            None => df.clone(),
        };
        let columns = table_columns(&shown)?;

        let mut body = String::from("<table>\n<thead>\n<tr>");
        for name in column_names(&shown) {
            let _ = write!(body, "<th>{}</th>", escape_html(&name));
        }
        body.push_str("</tr>\n</thead>\n<tbody>\n");
        for row in 0..shown.height() {
            body.push_str("<tr>");
            for cells in &columns {
                let text = cells.get(row).map(ToString::to_string).unwrap_or_default();
                let _ = write!(body, "<td>{}</td>", escape_html(&text));
            }
            body.push_str("</tr>\n");
        }
        body.push_str("</tbody>\n</table>\n");

        if shown.height() < df.height() {
            let _ = writeln!(
                body,
                "<p>Showing {} of {} rows.</p>",
                shown.height(),
                df.height()
            );
        }
        Ok(page("CSV Explorer", "", &body))
    }
}

/// Outcome of [`render_with_fallback`].
#[derive(Debug, Clone)]
pub struct RenderedExplorer {
    pub html: String,
    /// Name of the renderer that produced `html`.
    pub renderer: &'static str,
    /// Why the primary renderer was skipped, if it was.
    pub fallback_reason: Option<String>,
}

impl RenderedExplorer {
    pub fn used_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Renders with `primary`, substituting `fallback` when it fails.
///
/// Only a failure of the fallback is returned as an error.
pub fn render_with_fallback(
    primary: &dyn ExplorerRenderer,
    fallback: &dyn ExplorerRenderer,
    df: &DataFrame,
) -> Result<RenderedExplorer> {
    match primary.render(df) {
        Ok(html) => Ok(RenderedExplorer {
            html,
            renderer: primary.name(),
            fallback_reason: None,
        }),
        Err(err) => {
            tracing::warn!(
                renderer = primary.name(),
                fallback = fallback.name(),
                error = %err,
                "Explorer renderer failed, falling back"
            );
            let html = fallback.render(df)?;
            Ok(RenderedExplorer {
                html,
                renderer: fallback.name(),
                fallback_reason: Some(err.to_string()),
            })
        }
    }
}

/// Data handed to the widget: field list plus row records.
pub fn explorer_payload(df: &DataFrame) -> Result<Value> {
    let names = column_names(df);
    let columns = table_columns(df)?;

    let fields: Vec<Value> = df
        .get_columns()
        .iter()
        .map(|col| json!({ "name": col.name().as_str(), "dtype": col.dtype().to_string() }))
        .collect();

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut record = Map::new();
        for (name, cells) in names.iter().zip(&columns) {
            let value = cells.get(row).map_or(Value::Null, CellValue::to_json);
            record.insert(name.clone(), value);
        }
        records.push(Value::Object(record));
    }

    Ok(json!({ "fields": fields, "records": records }))
}

fn table_columns(df: &DataFrame) -> Result<Vec<Vec<CellValue>>> {
    let mut columns = Vec::with_capacity(df.width());
    for col in df.get_columns() {
        columns.push(column_cells(col)?);
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvx_ingest::load;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn people() -> DataFrame {
        load("name,age\nJohn,25\n<Jane>,\n".as_bytes()).unwrap()
    }

    struct FailingRenderer;

    impl ExplorerRenderer for FailingRenderer {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn render(&self, _df: &DataFrame) -> Result<String> {
            Err(ReportError::DataFrame {
                message: "widget unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_payload_keeps_sub_second_timestamps() {
        let df = load("at,n\n2024-01-01 10:00:00.500,1\n2024-01-02 00:00:00,2\n".as_bytes())
            .unwrap();
        let payload = explorer_payload(&df).unwrap();
        assert_eq!(payload["records"][0]["at"], json!("2024-01-01 10:00:00.500"));
        assert_eq!(payload["records"][1]["at"], json!("2024-01-02 00:00:00"));
        assert_eq!(payload["fields"][0]["name"], json!("at"));
    }

    #[test]
    fn test_static_renderer_escapes_cells() {
        let html = StaticRenderer::new().render(&people()).unwrap();
        assert!(html.contains("<th>name</th><th>age</th>"));
        assert!(html.contains("<td>John</td><td>25</td>"));
        assert!(html.contains("<td>&lt;Jane&gt;</td><td></td>"));
    }

    #[test]
    fn test_static_renderer_row_limit() {
        let html = StaticRenderer::new().with_max_rows(1).render(&people()).unwrap();
        assert!(!html.contains("Jane"));
        assert!(html.contains("Showing 1 of 2 rows."));
    }

    #[test]
    fn test_interactive_renderer_missing_config() {
        let renderer = InteractiveRenderer::new("/no/such/gw_config.json");
        let err = renderer.render(&people()).unwrap_err();
        assert!(matches!(err, ReportError::ConfigRead { .. }));
    }

    #[test]
    fn test_interactive_renderer_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = InteractiveRenderer::new(file.path())
            .render(&people())
            .unwrap_err();
        assert!(matches!(err, ReportError::ConfigParse { .. }));
    }

    #[test]
    fn test_interactive_renderer_embeds_config_and_data() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"theme": "light"}}"#).unwrap();
        let html = InteractiveRenderer::new(file.path())
            .render(&people())
            .unwrap();
        assert!(html.contains(r#"{"theme":"light"}"#));
        assert!(html.contains(r#""name":"John""#));
        assert!(html.contains("id=\"explorer-data\""));
    }

    #[test]
    fn test_fallback_used_on_primary_failure() {
        let rendered =
            render_with_fallback(&FailingRenderer, &StaticRenderer::new(), &people()).unwrap();
        assert!(rendered.used_fallback());
        assert_eq!(rendered.renderer, "static");
        assert!(
            rendered
                .fallback_reason
                .as_deref()
                .unwrap()
                .contains("widget unavailable")
        );
        assert!(rendered.html.contains("<table>"));
    }

    #[test]
    fn test_fallback_failure_is_error() {
        let result = render_with_fallback(&FailingRenderer, &FailingRenderer, &people());
        assert!(result.is_err());
    }

    #[test]
    fn test_primary_success_skips_fallback() {
        let rendered =
            render_with_fallback(&StaticRenderer::new(), &FailingRenderer, &people()).unwrap();
        assert!(!rendered.used_fallback());
        assert_eq!(rendered.renderer, "static");
    }

    #[test]
    fn test_explorer_payload_shape() {
        let payload = explorer_payload(&people()).unwrap();
        assert_eq!(payload["fields"][1]["name"], "age");
        assert_eq!(payload["records"][0]["age"], 25);
        assert_eq!(payload["records"][1]["age"], Value::Null);
    }
}
