use crate::analyser::logic::io::{read_dataset, resolve_from};
use crate::analyser::logic::*;
use crate::error::BookstatsError;
use anyhow::Result;
use std::io::Write as _;
use tempfile::NamedTempFile;

fn csv_file(contents: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_load_dataset_reads_csv() -> Result<()> {
    let file = csv_file(
        "bookID,title,authors,isbn,language_code,publication_date,publisher\n\
         1,Dune,Frank Herbert,0441013597,eng,8/1/1990,Ace\n\
         2,Emma,Jane Austen,,eng,5/1/2003,Penguin\n",
    )?;

    let df = load_dataset(file.path())?;
    assert_eq!(df.height(), 2);
    assert_eq!(df.width(), 7);

    let report = analyze_missing_isbn(&df)?;
    assert_eq!(report.isbn_analysis[0].missing_count, 1);
    Ok(())
}

#[test]
fn test_load_dataset_missing_file() {
    let err = load_dataset(std::path::Path::new("definitely/not/here.csv")).unwrap_err();
    assert!(matches!(err, BookstatsError::NotFound(_)));
}

#[test]
fn test_load_dataset_empty_file() -> Result<()> {
    let file = csv_file("")?;
    let err = load_dataset(file.path()).unwrap_err();
    assert!(matches!(err, BookstatsError::EmptyDataset(_)), "got {err}");
    Ok(())
}

#[test]
fn test_load_dataset_header_only() -> Result<()> {
    let file = csv_file("title,authors\n")?;
    let err = load_dataset(file.path()).unwrap_err();
    assert!(matches!(err, BookstatsError::EmptyDataset(_)), "got {err}");
    Ok(())
}

#[test]
fn test_load_dataset_rejects_other_formats() -> Result<()> {
    let file = tempfile::Builder::new().suffix(".parquet").tempfile()?;
    let err = load_dataset(file.path()).unwrap_err();
    assert!(matches!(err, BookstatsError::UnsupportedFormat(_)));
    Ok(())
}

#[test]
fn test_load_dataset_empty_path() {
    let err = load_dataset(std::path::Path::new("")).unwrap_err();
    assert!(matches!(err, BookstatsError::InvalidPath(_)));
}

#[test]
fn test_dataset_found_in_parent_directory() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub)?;
    std::fs::write(
        dir.path().join("cat.csv"),
        "title,authors\nDune,Frank Herbert\nEmma,Jane Austen\n",
    )?;

    let resolved = resolve_from(&sub, std::path::Path::new("cat.csv"))?;
    assert_eq!(resolved, sub.join("..").join("cat.csv"));

    let df = read_dataset(resolved)?;
    assert_eq!(df.height(), 2);
    assert_eq!(analyze_top_authors(&df, 5)?.author_counts.len(), 2);
    Ok(())
}

#[test]
fn test_dataset_in_base_directory_wins() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub)?;
    std::fs::write(dir.path().join("cat.csv"), "title\nParent\n")?;
    std::fs::write(sub.join("cat.csv"), "title\nLocal\n")?;

    let resolved = resolve_from(&sub, std::path::Path::new("cat.csv"))?;
    assert_eq!(resolved, sub.join("cat.csv"));
    Ok(())
}

#[test]
fn test_missing_in_both_directories() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub)?;

    let err = resolve_from(&sub, std::path::Path::new("cat.csv")).unwrap_err();
    assert!(matches!(err, BookstatsError::NotFound(ref p) if p.as_path() == std::path::Path::new("cat.csv")));
    Ok(())
}

#[test]
fn test_load_dataset_ragged_rows() -> Result<()> {
    let file = csv_file("title,authors\nDune,Frank Herbert\nEmma,Jane Austen,1815,extra\n")?;
    let err = load_dataset(file.path()).unwrap_err();
    assert!(
        matches!(err, BookstatsError::MalformedCsv { .. }),
        "got {err}"
    );
    assert!(err.to_string().contains("has invalid CSV format or structure"));
    Ok(())
}
