//! Output formatting for route and tour reports.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;

use navtour_lib::{PathSummary, TourSummary};

/// Report format selected with the global `--format` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain console report.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Render a shortest-path summary in the requested format.
pub fn render_path(summary: &PathSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(summary.render_text()),
        OutputFormat::Json => summary.to_json().context("failed to serialise route"),
    }
}

/// Render a tour summary in the requested format.
pub fn render_tour(summary: &TourSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(summary.render_text()),
        OutputFormat::Json => summary.to_json().context("failed to serialise tour"),
    }
}

/// Write a rendered report followed by a newline to stdout.
pub fn emit(report: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{report}").context("failed to write report")?;
    Ok(())
}
