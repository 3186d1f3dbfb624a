use super::columns::LogicalField;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Why an analysis produced no payload.
///
/// Every variant except [`AnalysisError::Table`] is an expected outcome of
/// dirty or incomplete data and is meant to be shown to the user as-is.
#[derive(Debug)]
pub enum AnalysisError {
    /// A required logical field has no matching column.
    MissingColumn {
        field: LogicalField,
        available: Vec<String>,
    },
    /// More than one required field is absent.
    MissingColumns {
        fields: Vec<LogicalField>,
        available: Vec<String>,
    },
    /// Columns resolved, but nothing survived validity filtering.
    NoValidData(String),
    /// The date column has values, none of which yielded a year.
    UnparseableYears { column: String },
    /// The table violated its own contract while being read.
    Table(polars::error::PolarsError),
}

impl AnalysisError {
    /// `false` only for failures that indicate a broken table rather than messy data.
    pub fn is_expected(&self) -> bool {
        !matches!(self, Self::Table(_))
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn { field, available } => write!(
                f,
                "{field} column not found in dataset! Available columns: {available:?}"
            ),
            Self::MissingColumns { fields, available } => {
                let joined = fields
                    .iter()
                    .map(|field| field.label())
                    .collect::<Vec<_>>()
                    .join(" and ");
                write!(
                    f,
                    "{joined} column(s) not found in dataset! Available columns: {available:?}"
                )
            }
            Self::NoValidData(msg) => f.write_str(msg),
            Self::UnparseableYears { column } => {
                write!(f, "Could not extract years from {column} column")
            }
            Self::Table(e) => write!(f, "Unexpected table error: {e}"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<polars::error::PolarsError> for AnalysisError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::Table(err)
    }
}

/// Either a payload or the reason there is none. Never both.
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

/// A label with its occurrence count, as found in ranked listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendStep {
    Up,
    Down,
    Same,
}

impl fmt::Display for TrendStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Same => "Same",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicationTrends {
    pub column: String,
    /// Books per valid year, ascending by year.
    pub year_counts: BTreeMap<i32, usize>,
    pub total_years: usize,
    pub most_productive_year: i32,
    pub most_productive_count: usize,
    pub least_productive_year: i32,
    pub least_productive_count: usize,
}

impl PublicationTrends {
    /// Number of books that carried a valid year.
    pub fn total_books(&self) -> usize {
        self.year_counts.values().sum()
    }

    pub fn average_per_year(&self) -> f64 {
        if self.total_years == 0 {
            return 0.0;
        }
        self.total_books() as f64 / self.total_years as f64
    }

    /// Each year with its count and the change from the previous listed year.
    pub fn year_over_year(&self) -> Vec<(i32, usize, Option<TrendStep>)> {
        let mut previous: Option<usize> = None;
        self.year_counts
            .iter()
            .map(|(&year, &count)| {
                let step = previous.map(|prev| match count.cmp(&prev) {
                    std::cmp::Ordering::Greater => TrendStep::Up,
                    std::cmp::Ordering::Less => TrendStep::Down,
                    std::cmp::Ordering::Equal => TrendStep::Same,
                });
                previous = Some(count);
                (year, count, step)
            })
            .collect()
    }

    /// Compares the last year's count against the first; `None` with fewer than two years.
    pub fn overall_direction(&self) -> Option<TrendDirection> {
        if self.year_counts.len() < 2 {
            return None;
        }
        let first = self.year_counts.values().next()?;
        let last = self.year_counts.values().next_back()?;
        Some(match last.cmp(first) {
            std::cmp::Ordering::Greater => TrendDirection::Increasing,
            std::cmp::Ordering::Less => TrendDirection::Decreasing,
            std::cmp::Ordering::Equal => TrendDirection::Stable,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopAuthors {
    pub column: String,
    pub author_counts: Vec<RankedCount>,
    pub top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub language: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageDistribution {
    pub column: String,
    pub lang_counts: Vec<RankedCount>,
    /// Same order as `lang_counts`, rounded to one decimal.
    pub lang_percentages: Vec<LanguageShare>,
    pub total_books: usize,
}

impl LanguageDistribution {
    pub fn percentage_of(&self, language: &str) -> Option<f64> {
        self.lang_percentages
            .iter()
            .find(|share| share.language == language)
            .map(|share| share.percentage)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublisherAnalysis {
    pub column: String,
    pub publisher_counts: Vec<RankedCount>,
    /// Distinct publishers across the whole table, not just the listed ones.
    pub total_publishers: usize,
    pub top_n: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl DataQuality {
    pub fn from_completeness(completeness: f64) -> Self {
        if completeness >= 90.0 {
            Self::Excellent
        } else if completeness >= 75.0 {
            Self::Good
        } else if completeness >= 50.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for DataQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsbnColumnStats {
    pub column: String,
    pub total_records: usize,
    pub present_count: usize,
    pub missing_count: usize,
    pub missing_percentage: f64,
}

impl IsbnColumnStats {
    pub fn completeness(&self) -> f64 {
        100.0 - self.missing_percentage
    }

    pub fn quality(&self) -> DataQuality {
        DataQuality::from_completeness(self.completeness())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingIsbnReport {
    /// One entry per ISBN-like column, in table order.
    pub isbn_analysis: Vec<IsbnColumnStats>,
    pub total_records: usize,
}

impl MissingIsbnReport {
    pub fn column(&self, name: &str) -> Option<&IsbnColumnStats> {
        self.isbn_analysis.iter().find(|c| c.column == name)
    }
}

/// Dense year × language count matrix. `year_lang_counts[i][j]` counts
/// books from `years[i]` written in `languages[j]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearLanguageMatrix {
    pub years: Vec<i32>,
    pub languages: Vec<String>,
    pub year_lang_counts: Vec<Vec<usize>>,
    /// Rows examined after the head cap was applied.
    pub rows_considered: usize,
}

impl YearLanguageMatrix {
    pub fn count(&self, year: i32, language: &str) -> usize {
        let row = self.years.iter().position(|&y| y == year);
        let col = self.languages.iter().position(|l| l == language);
        match (row, col) {
            (Some(r), Some(c)) => self
                .year_lang_counts
                .get(r)
                .and_then(|cells| cells.get(c))
                .copied()
                .unwrap_or(0),
            _ => 0,
        }
    }

    pub fn year_totals(&self) -> Vec<(i32, usize)> {
        self.years
            .iter()
            .zip(&self.year_lang_counts)
            .map(|(&year, cells)| (year, cells.iter().sum()))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.year_lang_counts.iter().flatten().sum()
    }
}

/// Shape of the loaded table, for the dataset overview screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetOverview {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnOverview>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnOverview {
    pub name: String,
    pub dtype: String,
    pub nulls: usize,
}
