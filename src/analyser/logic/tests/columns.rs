use crate::analyser::logic::columns::{column_names, isbn_columns};
use crate::analyser::logic::*;
use anyhow::Result;
use polars::prelude::*;

#[test]
fn test_resolve_alias_priority_order() {
    let cols = ["year", "date", "publication_date"];
    assert_eq!(
        resolve_alias(cols.as_slice(), LogicalField::PublicationDate.aliases()),
        Some("publication_date")
    );

    let cols = ["year", "title"];
    assert_eq!(
        resolve_alias(cols.as_slice(), LogicalField::PublicationDate.aliases()),
        Some("year")
    );
}

#[test]
fn test_resolve_alias_is_exact_and_case_sensitive() {
    let cols = ["Language_Code", " language", "languages"];
    assert_eq!(resolve_alias(cols.as_slice(), LogicalField::Language.aliases()), None);
}

#[test]
fn test_resolve_column_against_table() -> Result<()> {
    let df = df!(
        "writer" => &["Le Guin"],
        "book_author" => &["Tolkien"],
        "lang" => &["en"]
    )?;

    assert_eq!(resolve_column(&df, LogicalField::Authors), Some("writer"));
    assert_eq!(resolve_column(&df, LogicalField::Language), Some("lang"));
    assert_eq!(resolve_column(&df, LogicalField::Publisher), None);
    Ok(())
}

#[test]
fn test_isbn_columns_substring_match() -> Result<()> {
    let df = df!(
        "bookID" => &[1i64],
        "isbn" => &["0439785960"],
        "ISBN13" => &["9780439785969"],
        "old_Isbn_10" => &["x"]
    )?;

    assert_eq!(isbn_columns(&df), vec!["isbn", "ISBN13", "old_Isbn_10"]);
    assert_eq!(column_names(&df).len(), 4);
    Ok(())
}
