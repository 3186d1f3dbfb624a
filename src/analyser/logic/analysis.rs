use super::columns::{self, LogicalField};
use super::types::{
    AnalysisError, AnalysisResult, ColumnOverview, DatasetOverview, IsbnColumnStats,
    LanguageDistribution, LanguageShare, MissingIsbnReport, PublicationTrends, PublisherAnalysis,
    RankedCount, TopAuthors, YearLanguageMatrix,
};
use super::years::{self, YearWindow};
use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub const DEFAULT_TOP_AUTHORS: usize = 5;
pub const DEFAULT_TOP_PUBLISHERS: usize = 20;

/// Only the year × language breakdown looks at a head slice of the table.
pub const YEAR_LANGUAGE_ROW_CAP: usize = 1000;

/// Head-slice of the first `n` rows in table order.
///
/// `None`, `Some(0)` and an empty table all pass the table through untouched.
pub fn limit_rows(df: &DataFrame, n: Option<usize>) -> DataFrame {
    match n {
        Some(n) if n > 0 && !df.is_empty() => df.head(Some(n)),
        _ => df.clone(),
    }
}

pub fn analyze_publication_trends(
    df: &DataFrame,
    window: YearWindow,
) -> AnalysisResult<PublicationTrends> {
    let df = limit_rows(df, None);
    let date_col = require_column(&df, LogicalField::PublicationDate)?;
    let years = valid_years(&df, date_col, window)?;

    let mut year_counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in years.into_iter().flatten() {
        *year_counts.entry(year).or_insert(0) += 1;
    }

    // Strict comparisons keep the earliest year on ties.
    let mut most: Option<(i32, usize)> = None;
    let mut least: Option<(i32, usize)> = None;
    for (&year, &count) in &year_counts {
        if most.is_none_or(|(_, c)| count > c) {
            most = Some((year, count));
        }
        if least.is_none_or(|(_, c)| count < c) {
            least = Some((year, count));
        }
    }

    let (Some((most_productive_year, most_productive_count)), Some(least)) = (most, least) else {
        return Err(AnalysisError::NoValidData(
            "No valid publication years found in the data".to_owned(),
        ));
    };

    Ok(PublicationTrends {
        column: date_col.to_owned(),
        total_years: year_counts.len(),
        year_counts,
        most_productive_year,
        most_productive_count,
        least_productive_year: least.0,
        least_productive_count: least.1,
    })
}

pub fn analyze_top_authors(df: &DataFrame, top_n: usize) -> AnalysisResult<TopAuthors> {
    let df = limit_rows(df, None);
    let author_col = require_column(&df, LogicalField::Authors)?;

    let mut author_counts = count_values(df.column(author_col)?)?;
    author_counts.truncate(top_n);

    Ok(TopAuthors {
        column: author_col.to_owned(),
        author_counts,
        top_n,
    })
}

pub fn analyze_language_distribution(df: &DataFrame) -> AnalysisResult<LanguageDistribution> {
    let df = limit_rows(df, None);
    let lang_col = require_column(&df, LogicalField::Language)?;

    let lang_counts = count_values(df.column(lang_col)?)?;
    let total_books = df.height();

    let lang_percentages = lang_counts
        .iter()
        .map(|entry| LanguageShare {
            language: entry.name.clone(),
            percentage: round_one_decimal(entry.count as f64 / total_books as f64 * 100.0),
        })
        .collect();

    Ok(LanguageDistribution {
        column: lang_col.to_owned(),
        lang_counts,
        lang_percentages,
        total_books,
    })
}

pub fn analyze_books_by_publisher(
    df: &DataFrame,
    top_n: usize,
) -> AnalysisResult<PublisherAnalysis> {
    let df = limit_rows(df, None);
    let publisher_col = require_column(&df, LogicalField::Publisher)?;

    let mut publisher_counts = count_values(df.column(publisher_col)?)?;
    let total_publishers = publisher_counts.len();
    publisher_counts.truncate(top_n);

    Ok(PublisherAnalysis {
        column: publisher_col.to_owned(),
        publisher_counts,
        total_publishers,
        top_n,
    })
}

pub fn analyze_missing_isbn(df: &DataFrame) -> AnalysisResult<MissingIsbnReport> {
    let df = limit_rows(df, None);
    let isbn_cols = columns::isbn_columns(&df);
    if isbn_cols.is_empty() {
        return Err(AnalysisError::NoValidData(
            "No ISBN columns found in dataset!".to_owned(),
        ));
    }

    let total_records = df.height();
    let mut isbn_analysis = Vec::with_capacity(isbn_cols.len());

    for name in isbn_cols {
        let col = df.column(&name)?;
        let missing_count = col.null_count() + count_empty_strings(col)?;
        let present_count = total_records - missing_count;
        let missing_percentage = if total_records == 0 {
            0.0
        } else {
            missing_count as f64 / total_records as f64 * 100.0
        };

        tracing::debug!(column = %name, missing_count, present_count, "isbn coverage");
        isbn_analysis.push(IsbnColumnStats {
            column: name,
            total_records,
            present_count,
            missing_count,
            missing_percentage,
        });
    }

    Ok(MissingIsbnReport {
        isbn_analysis,
        total_records,
    })
}

pub fn analyze_books_per_year_by_language(
    df: &DataFrame,
    window: YearWindow,
) -> AnalysisResult<YearLanguageMatrix> {
    let df = limit_rows(df, Some(YEAR_LANGUAGE_ROW_CAP));

    let date_col = columns::resolve_column(&df, LogicalField::PublicationDate);
    let lang_col = columns::resolve_column(&df, LogicalField::Language);
    let (date_col, lang_col) = match (date_col, lang_col) {
        (Some(d), Some(l)) => (d, l),
        (None, Some(_)) => return Err(missing_column(&df, LogicalField::PublicationDate)),
        (Some(_), None) => return Err(missing_column(&df, LogicalField::Language)),
        (None, None) => {
            return Err(AnalysisError::MissingColumns {
                fields: vec![LogicalField::PublicationDate, LogicalField::Language],
                available: columns::column_names(&df),
            });
        }
    };

    let years = valid_years(&df, date_col, window)?;
    let languages = text_cells(df.column(lang_col)?)?;

    let mut pair_counts: BTreeMap<(i32, String), usize> = BTreeMap::new();
    for (year, language) in years.into_iter().zip(languages) {
        if let (Some(year), Some(language)) = (year, language) {
            *pair_counts.entry((year, language)).or_insert(0) += 1;
        }
    }

    if pair_counts.is_empty() {
        return Err(AnalysisError::NoValidData(
            "No valid year-language data found".to_owned(),
        ));
    }

    let year_axis: Vec<i32> = pair_counts
        .keys()
        .map(|(y, _)| *y)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let lang_axis: Vec<String> = pair_counts
        .keys()
        .map(|(_, l)| l.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let year_lang_counts = year_axis
        .iter()
        .map(|&year| {
            lang_axis
                .iter()
                .map(|lang| pair_counts.get(&(year, lang.clone())).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Ok(YearLanguageMatrix {
        years: year_axis,
        languages: lang_axis,
        year_lang_counts,
        rows_considered: df.height(),
    })
}

/// Shape, dtypes and null counts of the loaded table.
pub fn dataset_overview(df: &DataFrame) -> DatasetOverview {
    let columns = df
        .get_columns()
        .iter()
        .map(|c| ColumnOverview {
            name: c.name().to_string(),
            dtype: c.dtype().to_string(),
            nulls: c.null_count(),
        })
        .collect();

    DatasetOverview {
        row_count: df.height(),
        column_count: df.width(),
        columns,
    }
}

fn missing_column(df: &DataFrame, field: LogicalField) -> AnalysisError {
    AnalysisError::MissingColumn {
        field,
        available: columns::column_names(df),
    }
}

fn require_column(df: &DataFrame, field: LogicalField) -> AnalysisResult<&'static str> {
    columns::resolve_column(df, field).ok_or_else(|| missing_column(df, field))
}

/// In-window years for every row of `name`; out-of-window years are `None`.
fn valid_years(
    df: &DataFrame,
    name: &str,
    window: YearWindow,
) -> AnalysisResult<Vec<Option<i32>>> {
    let extracted = years::extract_years(df.column(name)?)?;
    tracing::debug!(
        column = name,
        strategy = ?extracted.strategy,
        extracted = extracted.extracted_count(),
        inputs = extracted.non_null_inputs,
        "extracted years"
    );

    if extracted.non_null_inputs > 0 && extracted.extracted_count() == 0 {
        return Err(AnalysisError::UnparseableYears {
            column: name.to_owned(),
        });
    }
    Ok(window.filter(&extracted.years))
}

/// Every cell as text; nulls stay `None`.
fn text_cells(col: &Column) -> PolarsResult<Vec<Option<String>>> {
    let text = col.as_materialized_series().cast(&DataType::String)?;
    Ok(text
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_owned))
        .collect())
}

/// Occurrences of each non-null value, most frequent first.
/// Equal counts keep the order in which values first appear.
fn count_values(col: &Column) -> PolarsResult<Vec<RankedCount>> {
    let text = col.as_materialized_series().cast(&DataType::String)?;
    let mut counts: Vec<RankedCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for value in text.str()?.into_iter().flatten() {
        if let Some(&i) = index.get(value) {
            if let Some(entry) = counts.get_mut(i) {
                entry.count += 1;
            }
        } else {
            index.insert(value.to_owned(), counts.len());
            counts.push(RankedCount {
                name: value.to_owned(),
                count: 1,
            });
        }
    }

    // Stable sort preserves first-seen order among ties.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(counts)
}

fn count_empty_strings(col: &Column) -> PolarsResult<usize> {
    if !matches!(col.dtype(), DataType::String) {
        return Ok(0);
    }
    Ok(col
        .as_materialized_series()
        .str()?
        .into_iter()
        .filter(|v| *v == Some(""))
        .count())
}

/// Rounds half-to-even, so `12.25` becomes `12.2`.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
