//! Column resolution for loosely named catalog exports.
//!
//! Catalog files arrive from different shops and tools, so the same logical
//! field can be spelled several ways. Resolution is exact and case-sensitive:
//! the first alias present in the table wins.

use polars::prelude::*;
use serde::Serialize;
use std::fmt;

/// A semantic field the analyses need, independent of its literal column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LogicalField {
    PublicationDate,
    Authors,
    Language,
    Publisher,
}

impl LogicalField {
    /// Accepted column names in priority order. Treated as a compatibility contract.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::PublicationDate => &["publication_date", "publication date", "date", "year"],
            Self::Authors => &["authors", "author", "writer", "book_author"],
            Self::Language => &["language_code", "language", "lang", "book_language"],
            Self::Publisher => &[
                "publisher",
                "book publisher",
                "book_publisher",
                "publishing_house",
            ],
        }
    }

    /// Lower-case name used when several missing fields are joined into one message.
    pub const fn label(self) -> &'static str {
        match self {
            Self::PublicationDate => "publication date",
            Self::Authors => "authors",
            Self::Language => "language",
            Self::Publisher => "publisher",
        }
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PublicationDate => "Publication date",
            Self::Authors => "Authors",
            Self::Language => "Language",
            Self::Publisher => "Publisher",
        };
        f.write_str(name)
    }
}

/// Returns the first alias that appears in `columns`, or `None`.
pub fn resolve_alias<'a, S: AsRef<str>>(columns: &[S], aliases: &[&'a str]) -> Option<&'a str> {
    aliases
        .iter()
        .copied()
        .find(|alias| columns.iter().any(|c| c.as_ref() == *alias))
}

/// Resolves a logical field against the columns of `df`.
pub fn resolve_column(df: &DataFrame, field: LogicalField) -> Option<&'static str> {
    let resolved = resolve_alias(&column_names(df), field.aliases());
    tracing::debug!(?field, ?resolved, "resolved column");
    resolved
}

/// Every column whose name contains `isbn`, ignoring case, in table order.
pub fn isbn_columns(df: &DataFrame) -> Vec<String> {
    column_names(df)
        .into_iter()
        .filter(|name| name.to_lowercase().contains("isbn"))
        .collect()
}

/// Column names of `df` in table order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}
