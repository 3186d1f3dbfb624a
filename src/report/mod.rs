//! Text and JSON rendering of analysis results.
//!
//! Every function here returns a `String`; writing it anywhere is the
//! caller's business. That keeps the whole module testable without a terminal.

pub mod chart;
pub mod terminal;

use crate::analyser::logic::{
    AnalysisError, AnalysisKind, AnalysisOptions, AnalysisOutcome, AnalysisResult,
    DatasetOverview,
};
use polars::prelude::DataFrame;
use serde_json::{Value, json};

/// Width of the `=` rule around section titles.
pub const BANNER_WIDTH: usize = 50;
/// Width of the `-` rule between consecutive analyses.
pub const SEPARATOR_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw text charts below the tables.
    pub charts: bool,
    /// Cells used by the longest bar.
    pub chart_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            charts: true,
            chart_width: 40,
        }
    }
}

pub fn banner(title: &str) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("\n{rule}\n   {title}\n{rule}\n")
}

pub fn separator() -> String {
    format!("\n{}\n", "-".repeat(SEPARATOR_WIDTH))
}

pub fn render_error(err: &AnalysisError) -> String {
    format!("Error: {err}\n")
}

pub fn render_outcome(outcome: &AnalysisOutcome, opts: &RenderOptions) -> String {
    match outcome {
        AnalysisOutcome::PublicationTrends(t) => terminal::render_trends(t, opts),
        AnalysisOutcome::TopAuthors(a) => terminal::render_top_authors(a, opts),
        AnalysisOutcome::LanguageDistribution(l) => terminal::render_languages(l, opts),
        AnalysisOutcome::Publishers(p) => terminal::render_publishers(p, opts),
        AnalysisOutcome::MissingIsbn(r) => terminal::render_missing_isbn(r),
        AnalysisOutcome::YearByLanguage(m) => terminal::render_year_language(m, opts),
    }
}

/// Banner followed by either the payload or the error line.
pub fn render_section(
    kind: AnalysisKind,
    result: &AnalysisResult<AnalysisOutcome>,
    analysis: &AnalysisOptions,
    opts: &RenderOptions,
) -> String {
    let mut out = banner(&kind.title(analysis));
    match result {
        Ok(outcome) => out.push_str(&render_outcome(outcome, opts)),
        Err(err) => out.push_str(&render_error(err)),
    }
    out
}

/// Shape, column types and the first rows of the table.
pub fn render_overview(overview: &DatasetOverview, preview: &DataFrame) -> String {
    let mut out = banner("DATASET OVERVIEW");
    out.push_str(&format!(
        "Dataset shape: {} rows × {} columns\n",
        overview.row_count, overview.column_count
    ));

    out.push_str(&format!("\n{:<30} {:<12} {:>8}\n", "Column", "Type", "Nulls"));
    out.push_str(&format!("{}\n", "-".repeat(52)));
    for col in &overview.columns {
        out.push_str(&format!("{:<30} {:<12} {:>8}\n", col.name, col.dtype, col.nulls));
    }

    if preview.height() > 0 {
        out.push_str(&format!("\n{preview}\n"));
    }
    out.push_str(&format!(
        "Showing {} out of {} total records\n",
        preview.height(),
        overview.row_count
    ));
    out
}

/// One JSON object per analysis. Failures become `{"analysis", "error"}` objects.
///
/// # Errors
///
/// Fails only if a payload cannot be serialized.
pub fn json_section(
    kind: AnalysisKind,
    result: &AnalysisResult<AnalysisOutcome>,
) -> serde_json::Result<Value> {
    match result {
        Ok(outcome) => serde_json::to_value(outcome),
        Err(err) => Ok(json!({
            "analysis": kind,
            "error": err.to_string(),
        })),
    }
}

/// Pretty-printed JSON document: the optional overview plus an `analyses`
/// array in the order given.
///
/// # Errors
///
/// Fails only if a payload cannot be serialized.
pub fn render_json(
    overview: Option<&DatasetOverview>,
    sections: &[(AnalysisKind, AnalysisResult<AnalysisOutcome>)],
) -> serde_json::Result<String> {
    let analyses = sections
        .iter()
        .map(|(kind, result)| json_section(*kind, result))
        .collect::<serde_json::Result<Vec<_>>>()?;

    let mut doc = serde_json::Map::new();
    if let Some(overview) = overview {
        doc.insert("overview".to_owned(), serde_json::to_value(overview)?);
    }
    doc.insert("analyses".to_owned(), Value::Array(analyses));
    serde_json::to_string_pretty(&doc)
}
