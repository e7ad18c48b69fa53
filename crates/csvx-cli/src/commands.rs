use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::DataFrame;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use csvx_ingest::{IngestError, LoadOptions, RaggedRows};
use csvx_report::{InteractiveRenderer, StaticRenderer, preview, render_with_fallback};
use csvx_session::{FileSessionStore, SessionId, SessionStore, load_or_create_sample};

use csvx_cli::inspect::{
    EMPTY_TABLE_MESSAGE, InspectOptions, inspect_file, inspect_table, merge_rules, read_rules,
};

use crate::cli::{InspectArgs, RaggedArg, ReportFormatArg, SampleArgs, ViewArgs};
use crate::summary::{print_file_info, print_preview, print_report};

/// Rows rendered by the static explorer fallback.
const STATIC_EXPLORER_ROWS: usize = 1000;

pub fn run_inspect(args: &InspectArgs) -> Result<i32> {
    let file_rules = args.rules.as_deref().map(read_rules).transpose()?;
    let options = InspectOptions {
        load: load_options(args),
        validation: merge_rules(file_rules, args.min_rows, &args.require),
    };

    let spinner = loading_spinner(&args.file);
    let result = inspect_file(&args.file, &options);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let inspection = match result {
        Ok(inspection) => inspection,
        Err(error) => {
            // Load failures carry a message meant for the user
            if let Some(load_error) = error.downcast_ref::<IngestError>() {
                eprintln!("{load_error}");
                return Ok(1);
            }
            return Err(error);
        }
    };

    let report = &inspection.report;
    if let Some(result) = report.validation.as_ref().filter(|v| !v.valid) {
        if let Some(file) = &report.file {
            print_file_info(file);
        }
        eprintln!("{}", result.message);
        return Ok(1);
    }

    if args.format == ReportFormatArg::Json {
        let json = serde_json::to_string_pretty(report).context("serialize report")?;
        println!("{json}");
    } else if report.summary.is_empty() {
        if let Some(file) = &report.file {
            print_file_info(file);
        }
        println!("{EMPTY_TABLE_MESSAGE}");
        return Ok(0);
    } else {
        print_report(report);
        show_preview(&inspection.df, args.view.preview)?;
    }

    write_explorer(&inspection.df, &args.view)?;
    Ok(0)
}

pub fn run_sample(args: &SampleArgs) -> Result<i32> {
    let session = SessionId::parse(&args.session)?;
    let span = info_span!("sample", session = %session);
    let _guard = span.enter();

    let store = FileSessionStore::from_env();
    let (df, created) = match args.seed {
        Some(seed) => load_or_create_sample(&store, &session, &mut StdRng::seed_from_u64(seed))?,
        None => load_or_create_sample(&store, &session, &mut rand::rng())?,
    };
    if created {
        info!(root = %store.root().display(), "Generated sample dataset");
    }

    let inspection = inspect_table(df, None)?;
    println!("Sample data (session {session})");
    print_report(&inspection.report);
    show_preview(&inspection.df, args.view.preview)?;
    write_explorer(&inspection.df, &args.view)?;
    Ok(0)
}

pub fn run_session_clear(session: &str) -> Result<i32> {
    let session = SessionId::parse(session)?;
    let store = FileSessionStore::from_env();
    if store.clear(&session)? {
        println!("Cleared session {session}.");
    } else {
        println!("Session {session} has no stored data.");
    }
    Ok(0)
}

fn load_options(args: &InspectArgs) -> LoadOptions {
    let ragged = match args.ragged {
        RaggedArg::Reject => RaggedRows::Reject,
        RaggedArg::Pad => RaggedRows::Pad,
    };
    LoadOptions::default()
        .with_ragged_rows(ragged)
        .with_na_values(args.na_values.clone())
}

fn show_preview(df: &DataFrame, requested: usize) -> Result<()> {
    let window = preview(df, requested);
    print_preview(&window, df.height())
}

fn write_explorer(df: &DataFrame, view: &ViewArgs) -> Result<()> {
    let Some(out) = &view.html else {
        return Ok(());
    };
    let interactive = InteractiveRenderer::new(view.explorer_config.clone());
    let fallback = StaticRenderer::new().with_max_rows(STATIC_EXPLORER_ROWS);
    let rendered =
        render_with_fallback(&interactive, &fallback, df).context("render explorer")?;
    if let Some(reason) = &rendered.fallback_reason {
        eprintln!("Interactive explorer unavailable ({reason}); showing a static table.");
    }
    std::fs::write(out, rendered.html).with_context(|| format!("write {}", out.display()))?;
    info!(path = %out.display(), renderer = rendered.renderer, "Wrote explorer page");
    println!("Explorer written to {}", out.display());
    Ok(())
}

fn loading_spinner(path: &Path) -> Option<ProgressBar> {
    if !io::stderr().is_terminal() {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Loading {}", path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}
