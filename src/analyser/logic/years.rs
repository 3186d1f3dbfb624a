//! Year extraction from messy publication-date columns.
//!
//! A date column may hold plain integer years, floats from a spreadsheet
//! export, full date strings in several layouts, or free text such as
//! `"circa 1999"`. Extraction never fails on a bad cell: the cell becomes
//! `None`. Range validation is separate so the current year can be injected.

use chrono::{DateTime, Datelike as _, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const MIN_VALID_YEAR: i32 = 1800;

/// How far past the current year a publication year may lie (pre-announced titles).
pub const FUTURE_YEAR_SLACK: i32 = 5;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

#[expect(clippy::unwrap_used)]
static FOUR_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

/// Inclusive range of plausible publication years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearWindow {
    min: i32,
    max: i32,
}

impl YearWindow {
    /// `[1800, current_year + 5]`.
    pub const fn for_current_year(current_year: i32) -> Self {
        Self {
            min: MIN_VALID_YEAR,
            max: current_year + FUTURE_YEAR_SLACK,
        }
    }

    /// Window anchored at the local wall-clock year.
    pub fn current() -> Self {
        Self::for_current_year(chrono::Local::now().year())
    }

    pub const fn min(&self) -> i32 {
        self.min
    }

    pub const fn max(&self) -> i32 {
        self.max
    }

    pub const fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }

    /// Keeps in-range years, nulls everything else. Length is preserved.
    pub fn filter(&self, years: &[Option<i32>]) -> Vec<Option<i32>> {
        years
            .iter()
            .map(|year| year.filter(|&y| self.contains(y)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum YearStrategy {
    /// Column was numeric; values taken as years directly.
    Numeric,
    /// Cells parsed as calendar dates.
    DateParse,
    /// First four-digit run pulled out of each cell.
    DigitPattern,
}

/// Raw, unvalidated years for every row of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedYears {
    pub strategy: YearStrategy,
    pub years: Vec<Option<i32>>,
    /// Non-null cells in the source column.
    pub non_null_inputs: usize,
}

impl ExtractedYears {
    pub fn extracted_count(&self) -> usize {
        self.years.iter().flatten().count()
    }
}

/// Extracts one nullable year per row of `column`.
///
/// Numeric columns are read as years. Anything else is stringified and parsed
/// as a date; if not a single cell parses, the column is treated as free text
/// and the first four-digit run of each cell is used instead.
///
/// # Errors
///
/// Returns an error only if polars cannot cast the column, which a
/// well-formed table never triggers.
pub fn extract_years(column: &Column) -> PolarsResult<ExtractedYears> {
    let series = column.as_materialized_series();
    let dtype = series.dtype();
    let non_null_inputs = series.len() - series.null_count();

    if dtype.is_integer() || dtype.is_float() {
        let casted = series.cast(&DataType::Float64)?;
        let years = casted
            .f64()?
            .into_iter()
            .map(|v| v.and_then(year_from_number))
            .collect();
        return Ok(ExtractedYears {
            strategy: YearStrategy::Numeric,
            years,
            non_null_inputs,
        });
    }

    let text = series.cast(&DataType::String)?;
    let text = text.str()?;

    let parsed: Vec<Option<i32>> = text
        .into_iter()
        .map(|v| v.and_then(parse_date_year))
        .collect();

    if non_null_inputs == 0 || parsed.iter().any(Option::is_some) {
        return Ok(ExtractedYears {
            strategy: YearStrategy::DateParse,
            years: parsed,
            non_null_inputs,
        });
    }

    tracing::warn!(
        column = %series.name(),
        "no cell parsed as a date, falling back to four-digit extraction"
    );
    let years = text
        .into_iter()
        .map(|v| v.and_then(first_four_digits))
        .collect();
    Ok(ExtractedYears {
        strategy: YearStrategy::DigitPattern,
        years,
        non_null_inputs,
    })
}

/// Whole numbers only; `2001.5` is not a year.
pub fn year_from_number(value: f64) -> Option<i32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}

/// Parses `text` as a calendar date and returns its year.
pub fn parse_date_year(text: &str) -> Option<i32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    // A bare year is a valid date at January 1st.
    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().ok();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.year());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .map(|d| d.year())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.year())
        })
}

/// First run of four digits anywhere in `text`.
pub fn first_four_digits(text: &str) -> Option<i32> {
    FOUR_DIGITS
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}
