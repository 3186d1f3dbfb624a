//! Plain-text renderings of each analysis payload.

use super::RenderOptions;
use super::chart::{bar_chart, heat_grid};
use crate::analyser::logic::{
    DataQuality, LanguageDistribution, MissingIsbnReport, PublicationTrends, PublisherAnalysis,
    RankedCount, TopAuthors, YEAR_LANGUAGE_ROW_CAP, YearLanguageMatrix,
};

/// Year table, summary block and an optional per-year bar chart.
pub fn render_trends(trends: &PublicationTrends, opts: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:<8} {:<15} {:<10}\n", "Year", "Books Published", "Trend"));
    out.push_str(&format!("{}\n", "-".repeat(35)));
    for (year, count, step) in trends.year_over_year() {
        let step = step.map_or_else(|| "—".to_owned(), |s| s.to_string());
        out.push_str(&format!("{year:<8} {count:<15} {step:<10}\n"));
    }

    out.push_str("\nPublication Trends Summary:\n");
    out.push_str(&format!(
        "   Total years with publications: {}\n",
        trends.total_years
    ));
    out.push_str(&format!(
        "   Most productive year: {} ({} books)\n",
        trends.most_productive_year, trends.most_productive_count
    ));
    out.push_str(&format!(
        "   Least productive year: {} ({} books)\n",
        trends.least_productive_year, trends.least_productive_count
    ));
    out.push_str(&format!(
        "   Average books per year: {:.1}\n",
        trends.average_per_year()
    ));
    out.push_str(&format!("   Total books analyzed: {}\n", trends.total_books()));
    if let Some(direction) = trends.overall_direction() {
        out.push_str(&format!("   Overall trend: {direction}\n"));
    }

    if opts.charts {
        let rows: Vec<(String, f64)> = trends
            .year_counts
            .iter()
            .map(|(year, &count)| (year.to_string(), count as f64))
            .collect();
        out.push_str("\nBooks published per year:\n");
        out.push_str(&bar_chart(&rows, opts.chart_width));
    }
    out
}

pub fn render_top_authors(authors: &TopAuthors, opts: &RenderOptions) -> String {
    let mut out = String::from("\nTop Authors Summary:\n");
    push_ranked(&mut out, &authors.author_counts);
    if opts.charts {
        out.push('\n');
        out.push_str(&bar_chart(&ranked_rows(&authors.author_counts), opts.chart_width));
    }
    out
}

pub fn render_languages(dist: &LanguageDistribution, opts: &RenderOptions) -> String {
    let mut out = format!(
        "\nLanguage Distribution Summary ({} total books):\n",
        dist.total_books
    );
    for (entry, share) in dist.lang_counts.iter().zip(&dist.lang_percentages) {
        out.push_str(&format!(
            "   {}: {} books ({}%)\n",
            entry.name, entry.count, share.percentage
        ));
    }

    if opts.charts {
        let rows: Vec<(String, f64)> = dist
            .lang_percentages
            .iter()
            .map(|share| (share.language.clone(), share.percentage))
            .collect();
        out.push_str("\nShare of catalog (%):\n");
        out.push_str(&bar_chart(&rows, opts.chart_width));
    }
    out
}

pub fn render_publishers(publishers: &PublisherAnalysis, opts: &RenderOptions) -> String {
    let mut out = String::from("\nPublisher Summary:\n");
    out.push_str(&format!(
        "   Total publishers: {}\n",
        publishers.total_publishers
    ));
    out.push_str(&format!("   Top {} publishers:\n", publishers.top_n));
    push_ranked(&mut out, &publishers.publisher_counts);
    if opts.charts {
        out.push('\n');
        out.push_str(&bar_chart(
            &ranked_rows(&publishers.publisher_counts),
            opts.chart_width,
        ));
    }
    out
}

/// Per-column counts, a completeness table and the quality grades.
///
/// Never charted: the table already carries every number.
pub fn render_missing_isbn(report: &MissingIsbnReport) -> String {
    let mut out = String::new();
    for stats in &report.isbn_analysis {
        out.push_str(&format!("\n   {}:\n", stats.column.to_uppercase()));
        out.push_str(&format!("     Total records: {}\n", stats.total_records));
        out.push_str(&format!("     Present: {}\n", stats.present_count));
        out.push_str(&format!("     Missing: {}\n", stats.missing_count));
        out.push_str(&format!(
            "     Missing percentage: {:.2}%\n",
            stats.missing_percentage
        ));
    }

    out.push_str("\nSummary:\n");
    out.push_str(&format!(
        "   {:<15} {:<10} {:<10} {:<12} {:<12}\n",
        "Column", "Present", "Missing", "Missing %", "Complete %"
    ));
    out.push_str(&format!("   {}\n", "-".repeat(63)));
    for stats in &report.isbn_analysis {
        out.push_str(&format!(
            "   {:<15} {:<10} {:<10} {:<12} {:<12}\n",
            stats.column,
            stats.present_count,
            stats.missing_count,
            format!("{:.1}%", stats.missing_percentage),
            format!("{:.1}%", stats.completeness()),
        ));
    }

    out.push_str("\nData Quality Assessment:\n");
    for stats in &report.isbn_analysis {
        let quality = stats.quality();
        out.push_str(&format!(
            "   {}: {quality} ({:.1}% complete) - {}\n",
            stats.column,
            stats.completeness(),
            quality_note(quality)
        ));
    }
    out
}

fn quality_note(quality: DataQuality) -> &'static str {
    match quality {
        DataQuality::Excellent => "very few records lack this identifier",
        DataQuality::Good => "most records carry this identifier",
        DataQuality::Fair => "a sizable share of records need attention",
        DataQuality::Poor => "most records lack this identifier",
    }
}

/// Per-year language listing followed by the matrix and an optional heat grid.
pub fn render_year_language(matrix: &YearLanguageMatrix, opts: &RenderOptions) -> String {
    let mut out = format!(
        "\nBooks Per Year by Language Summary (First {YEAR_LANGUAGE_ROW_CAP} records only):\n"
    );
    for (year, cells) in matrix.years.iter().zip(&matrix.year_lang_counts) {
        out.push_str(&format!("\n   {year}:\n"));
        for (lang, &count) in matrix.languages.iter().zip(cells) {
            if count > 0 {
                out.push_str(&format!("     {lang}: {count} books\n"));
            }
        }
    }

    out.push_str("\nYear × language matrix:\n");
    out.push_str(&format!("{:<6}", "Year"));
    for lang in &matrix.languages {
        out.push_str(&format!(" {lang:>6}"));
    }
    out.push_str(&format!(" {:>7}\n", "Total"));
    for ((year, cells), (_, total)) in matrix
        .years
        .iter()
        .zip(&matrix.year_lang_counts)
        .zip(matrix.year_totals())
    {
        out.push_str(&format!("{year:<6}"));
        for count in cells {
            out.push_str(&format!(" {count:>6}"));
        }
        out.push_str(&format!(" {total:>7}\n"));
    }

    if opts.charts {
        out.push('\n');
        out.push_str(&heat_grid(matrix));
    }
    out
}

fn push_ranked(out: &mut String, entries: &[RankedCount]) {
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!("   {}. {}: {} books\n", i + 1, entry.name, entry.count));
    }
}

fn ranked_rows(entries: &[RankedCount]) -> Vec<(String, f64)> {
    entries
        .iter()
        .map(|e| (e.name.clone(), e.count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyser::logic::{IsbnColumnStats, LanguageShare};
    use std::collections::BTreeMap;

    const TEXT: RenderOptions = RenderOptions {
        charts: false,
        chart_width: 40,
    };

    fn trends() -> PublicationTrends {
        PublicationTrends {
            column: "publication_date".to_owned(),
            year_counts: BTreeMap::from([(2001, 2), (2002, 1), (2003, 3)]),
            total_years: 3,
            most_productive_year: 2003,
            most_productive_count: 3,
            least_productive_year: 2002,
            least_productive_count: 1,
        }
    }

    #[test]
    fn test_trends_table_and_summary() {
        let text = render_trends(&trends(), &TEXT);
        assert!(text.contains("2001     2               —"));
        assert!(text.contains("2002     1               Down"));
        assert!(text.contains("2003     3               Up"));
        assert!(text.contains("Most productive year: 2003 (3 books)"));
        assert!(text.contains("Least productive year: 2002 (1 books)"));
        assert!(text.contains("Average books per year: 2.0"));
        assert!(text.contains("Total books analyzed: 6"));
        assert!(text.contains("Overall trend: increasing"));
        assert!(!text.contains('█'));
    }

    #[test]
    fn test_trends_chart_when_enabled() {
        let opts = RenderOptions {
            charts: true,
            chart_width: 12,
        };
        let text = render_trends(&trends(), &opts);
        assert!(text.contains(&"█".repeat(12)));
    }

    #[test]
    fn test_single_year_has_no_overall_trend() {
        let mut t = trends();
        t.year_counts = BTreeMap::from([(2001, 2)]);
        t.total_years = 1;
        assert!(!render_trends(&t, &TEXT).contains("Overall trend"));
    }

    #[test]
    fn test_authors_listing() {
        let authors = TopAuthors {
            column: "authors".to_owned(),
            author_counts: vec![
                RankedCount {
                    name: "A".to_owned(),
                    count: 3,
                },
                RankedCount {
                    name: "B".to_owned(),
                    count: 1,
                },
            ],
            top_n: 5,
        };
        let text = render_top_authors(&authors, &TEXT);
        assert!(text.contains("Top Authors Summary:"));
        assert!(text.contains("   1. A: 3 books\n   2. B: 1 books\n"));
    }

    #[test]
    fn test_language_percentages() {
        let dist = LanguageDistribution {
            column: "language_code".to_owned(),
            lang_counts: vec![RankedCount {
                name: "eng".to_owned(),
                count: 5,
            }],
            lang_percentages: vec![LanguageShare {
                language: "eng".to_owned(),
                percentage: 83.3,
            }],
            total_books: 6,
        };
        let text = render_languages(&dist, &TEXT);
        assert!(text.contains("(6 total books)"));
        assert!(text.contains("   eng: 5 books (83.3%)"));
    }

    #[test]
    fn test_publisher_header() {
        let publishers = PublisherAnalysis {
            column: "publisher".to_owned(),
            publisher_counts: vec![RankedCount {
                name: "X".to_owned(),
                count: 2,
            }],
            total_publishers: 4,
            top_n: 20,
        };
        let text = render_publishers(&publishers, &TEXT);
        assert!(text.contains("   Total publishers: 4\n   Top 20 publishers:\n   1. X: 2 books"));
    }

    #[test]
    fn test_isbn_block_and_grade() {
        let report = MissingIsbnReport {
            isbn_analysis: vec![IsbnColumnStats {
                column: "isbn".to_owned(),
                total_records: 5,
                present_count: 3,
                missing_count: 2,
                missing_percentage: 40.0,
            }],
            total_records: 5,
        };
        let text = render_missing_isbn(&report);
        assert!(text.contains("\n   ISBN:\n"));
        assert!(text.contains("Missing percentage: 40.00%"));
        assert!(text.contains("isbn: Fair (60.0% complete)"));
    }

    #[test]
    fn test_year_language_skips_empty_cells() {
        let matrix = YearLanguageMatrix {
            years: vec![2001, 2002],
            languages: vec!["eng".to_owned(), "spa".to_owned()],
            year_lang_counts: vec![vec![2, 0], vec![1, 1]],
            rows_considered: 4,
        };
        let text = render_year_language(&matrix, &TEXT);
        assert!(text.contains("(First 1000 records only)"));
        assert!(text.contains("\n   2001:\n     eng: 2 books\n"));
        assert!(!text.contains("spa: 0 books"));
        assert!(text.contains("\n   2002:\n     eng: 1 books\n     spa: 1 books\n"));
    }
}
