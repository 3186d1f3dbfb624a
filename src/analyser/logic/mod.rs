pub mod analysis;
pub mod columns;
pub mod flows;
pub mod io;
pub mod types;
pub mod years;

pub use analysis::{
    DEFAULT_TOP_AUTHORS, DEFAULT_TOP_PUBLISHERS, YEAR_LANGUAGE_ROW_CAP,
    analyze_books_by_publisher, analyze_books_per_year_by_language, analyze_language_distribution,
    analyze_missing_isbn, analyze_publication_trends, analyze_top_authors, dataset_overview,
    limit_rows,
};
pub use columns::{LogicalField, isbn_columns, resolve_alias, resolve_column};
pub use flows::{AnalysisKind, AnalysisOptions, AnalysisOutcome, analyze_file_flow, run_analysis};
pub use io::{DEFAULT_DATASET, load_dataset};
pub use types::{
    AnalysisError, AnalysisResult, ColumnOverview, DataQuality, DatasetOverview,
    IsbnColumnStats, LanguageDistribution, LanguageShare, MissingIsbnReport, PublicationTrends,
    PublisherAnalysis, RankedCount, TopAuthors, TrendDirection, TrendStep, YearLanguageMatrix,
};
pub use years::{YearStrategy, YearWindow, extract_years};

#[cfg(test)]
mod tests;
