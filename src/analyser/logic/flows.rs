//! Runs any analysis by kind, so front doors can sequence them uniformly.

use super::analysis::{
    DEFAULT_TOP_AUTHORS, DEFAULT_TOP_PUBLISHERS, YEAR_LANGUAGE_ROW_CAP,
    analyze_books_by_publisher, analyze_books_per_year_by_language, analyze_language_distribution,
    analyze_missing_isbn, analyze_publication_trends, analyze_top_authors,
};
use super::io::load_dataset;
use super::types::{
    AnalysisResult, LanguageDistribution, MissingIsbnReport, PublicationTrends,
    PublisherAnalysis, TopAuthors, YearLanguageMatrix,
};
use super::years::YearWindow;
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    PublicationTrends,
    TopAuthors,
    LanguageDistribution,
    Publishers,
    MissingIsbn,
    YearByLanguage,
}

impl AnalysisKind {
    /// Menu order.
    pub const ALL: [Self; 6] = [
        Self::PublicationTrends,
        Self::TopAuthors,
        Self::LanguageDistribution,
        Self::Publishers,
        Self::MissingIsbn,
        Self::YearByLanguage,
    ];

    /// Upper-case heading printed above the analysis.
    pub fn title(self, options: &AnalysisOptions) -> String {
        match self {
            Self::PublicationTrends => "PUBLICATION TRENDS OVER TIME".to_owned(),
            Self::TopAuthors => format!("TOP {} MOST PROLIFIC AUTHORS", options.top_authors),
            Self::LanguageDistribution => "LANGUAGE DISTRIBUTION".to_owned(),
            Self::Publishers => "BOOKS BY PUBLISHER".to_owned(),
            Self::MissingIsbn => "MISSING ISBN ANALYSIS".to_owned(),
            Self::YearByLanguage => {
                format!("BOOKS PER YEAR BY LANGUAGE (FIRST {YEAR_LANGUAGE_ROW_CAP} RECORDS)")
            }
        }
    }

    pub fn menu_label(self, options: &AnalysisOptions) -> String {
        match self {
            Self::PublicationTrends => "Show publication trends over time".to_owned(),
            Self::TopAuthors => {
                format!("Show top {} most prolific authors", options.top_authors)
            }
            Self::LanguageDistribution => "Show language distribution of books".to_owned(),
            Self::Publishers => "Show number of books published by each publisher".to_owned(),
            Self::MissingIsbn => "Show missing ISBN analysis".to_owned(),
            Self::YearByLanguage => format!(
                "Show books published per year categorized by language (first {YEAR_LANGUAGE_ROW_CAP} records)"
            ),
        }
    }
}

/// Per-call parameters. The current year lives here so nothing inside the
/// engine reads the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub window: YearWindow,
    pub top_authors: usize,
    pub top_publishers: usize,
}

impl AnalysisOptions {
    pub const fn for_current_year(current_year: i32) -> Self {
        Self {
            window: YearWindow::for_current_year(current_year),
            top_authors: DEFAULT_TOP_AUTHORS,
            top_publishers: DEFAULT_TOP_PUBLISHERS,
        }
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            window: YearWindow::current(),
            top_authors: DEFAULT_TOP_AUTHORS,
            top_publishers: DEFAULT_TOP_PUBLISHERS,
        }
    }
}

/// Payload of whichever analysis ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "analysis", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    PublicationTrends(PublicationTrends),
    TopAuthors(TopAuthors),
    LanguageDistribution(LanguageDistribution),
    Publishers(PublisherAnalysis),
    MissingIsbn(MissingIsbnReport),
    YearByLanguage(YearLanguageMatrix),
}

impl AnalysisOutcome {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            Self::PublicationTrends(_) => AnalysisKind::PublicationTrends,
            Self::TopAuthors(_) => AnalysisKind::TopAuthors,
            Self::LanguageDistribution(_) => AnalysisKind::LanguageDistribution,
            Self::Publishers(_) => AnalysisKind::Publishers,
            Self::MissingIsbn(_) => AnalysisKind::MissingIsbn,
            Self::YearByLanguage(_) => AnalysisKind::YearByLanguage,
        }
    }
}

pub fn run_analysis(
    kind: AnalysisKind,
    df: &DataFrame,
    options: &AnalysisOptions,
) -> AnalysisResult<AnalysisOutcome> {
    tracing::debug!(?kind, rows = df.height(), "running analysis");
    let outcome = match kind {
        AnalysisKind::PublicationTrends => {
            AnalysisOutcome::PublicationTrends(analyze_publication_trends(df, options.window)?)
        }
        AnalysisKind::TopAuthors => {
            AnalysisOutcome::TopAuthors(analyze_top_authors(df, options.top_authors)?)
        }
        AnalysisKind::LanguageDistribution => {
            AnalysisOutcome::LanguageDistribution(analyze_language_distribution(df)?)
        }
        AnalysisKind::Publishers => {
            AnalysisOutcome::Publishers(analyze_books_by_publisher(df, options.top_publishers)?)
        }
        AnalysisKind::MissingIsbn => AnalysisOutcome::MissingIsbn(analyze_missing_isbn(df)?),
        AnalysisKind::YearByLanguage => AnalysisOutcome::YearByLanguage(
            analyze_books_per_year_by_language(df, options.window)?,
        ),
    };
    Ok(outcome)
}

/// Loads a catalog and runs each requested analysis against it in order.
///
/// # Errors
///
/// Fails only if the catalog cannot be loaded; per-analysis failures are
/// returned alongside their kind.
pub fn analyze_file_flow(
    path: &Path,
    kinds: &[AnalysisKind],
    options: &AnalysisOptions,
) -> crate::error::Result<Vec<(AnalysisKind, AnalysisResult<AnalysisOutcome>)>> {
    let df = load_dataset(path)?;
    Ok(kinds
        .iter()
        .map(|&kind| (kind, run_analysis(kind, &df, options)))
        .collect())
}
