use super::TEST_WINDOW;
use crate::analyser::logic::*;
use polars::prelude::*;
use proptest::prelude::*;

fn year_strategy() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![
        3 => (1790i64..2040).prop_map(Some),
        1 => Just(None),
    ]
}

fn label_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        4 => "[a-e]".prop_map(Some),
        1 => Just(None),
    ]
}

fn table(years: &[Option<i64>], labels: &[Option<String>]) -> DataFrame {
    let labels: Vec<Option<&str>> = labels.iter().map(|l| l.as_deref()).collect();
    df!(
        "publication_date" => years,
        "authors" => &labels,
        "language_code" => &labels,
        "publisher" => &labels,
        "isbn" => &labels
    )
    .unwrap()
}

fn pairs() -> impl Strategy<Value = (Vec<Option<i64>>, Vec<Option<String>>)> {
    (0usize..60).prop_flat_map(|len| {
        (
            proptest::collection::vec(year_strategy(), len),
            proptest::collection::vec(label_strategy(), len),
        )
    })
}

proptest! {
    /// Per-year counts add up to the rows holding an in-window year.
    #[test]
    fn trend_counts_cover_every_valid_year((years, labels) in pairs()) {
        let df = table(&years, &labels);
        let valid = years
            .iter()
            .flatten()
            .filter(|&&y| TEST_WINDOW.contains(i32::try_from(y).unwrap()))
            .count();

        match analyze_publication_trends(&df, TEST_WINDOW) {
            Ok(trends) => prop_assert_eq!(trends.total_books(), valid),
            Err(_) => prop_assert_eq!(valid, 0),
        }
    }

    /// Ranked lists never exceed the requested size nor the distinct values present.
    #[test]
    fn top_n_is_bounded((years, labels) in pairs(), top_n in 0usize..8) {
        let df = table(&years, &labels);
        let distinct = labels
            .iter()
            .flatten()
            .collect::<std::collections::HashSet<_>>()
            .len();

        let authors = analyze_top_authors(&df, top_n).unwrap();
        prop_assert_eq!(authors.author_counts.len(), top_n.min(distinct));

        let publishers = analyze_books_by_publisher(&df, top_n).unwrap();
        prop_assert_eq!(publishers.publisher_counts.len(), top_n.min(distinct));
        prop_assert_eq!(publishers.total_publishers, distinct);
    }

    /// Without null languages the shares add up to 100 within rounding.
    #[test]
    fn language_shares_sum_to_hundred(labels in proptest::collection::vec("[a-e]", 1..60)) {
        let labels: Vec<Option<String>> = labels.into_iter().map(Some).collect();
        let years = vec![Some(2000i64); labels.len()];
        let df = table(&years, &labels);

        let dist = analyze_language_distribution(&df).unwrap();
        let sum: f64 = dist.lang_percentages.iter().map(|s| s.percentage).sum();
        prop_assert!((sum - 100.0).abs() <= 0.05 * dist.lang_percentages.len() as f64);
    }

    /// Present plus missing always equals the row count.
    #[test]
    fn isbn_counts_are_conserved((years, labels) in pairs()) {
        let df = table(&years, &labels);
        let report = analyze_missing_isbn(&df).unwrap();
        for col in &report.isbn_analysis {
            prop_assert_eq!(col.present_count + col.missing_count, col.total_records);
        }
    }

    /// Matrix cells add up to rows with both a valid year and a language.
    #[test]
    fn matrix_total_matches_complete_rows((years, labels) in pairs()) {
        let df = table(&years, &labels);
        let complete = years
            .iter()
            .zip(&labels)
            .filter(|(y, l)| {
                l.is_some() && y.is_some_and(|y| TEST_WINDOW.contains(i32::try_from(y).unwrap()))
            })
            .count();

        match analyze_books_per_year_by_language(&df, TEST_WINDOW) {
            Ok(matrix) => prop_assert_eq!(matrix.total(), complete),
            Err(_) => prop_assert_eq!(complete, 0),
        }
    }
}
