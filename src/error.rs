//! Application-level error handling for bookstats.
//!
//! Analysis outcomes caused by messy data are *not* errors at this level;
//! they are [`AnalysisError`](crate::analyser::logic::AnalysisError) values
//! returned by the engine and shown to the user. [`BookstatsError`] covers
//! getting a catalog off disk and into a table.
//!
//! ```no_run
//! use bookstats::analyser::logic::load_dataset;
//! use bookstats::error::BookstatsError;
//! use std::path::Path;
//!
//! match load_dataset(Path::new("Dataset_Books.csv")) {
//!     Ok(df) => println!("{} rows", df.height()),
//!     Err(BookstatsError::NotFound(path)) => eprintln!("no catalog at {}", path.display()),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::fmt;
use std::path::PathBuf;

/// Main error type for bookstats operations.
#[derive(Debug)]
pub enum BookstatsError {
    /// I/O errors while inspecting the file
    Io(std::io::Error),

    /// No path was given, or it could not be interpreted
    InvalidPath(String),

    /// Dataset file does not exist
    NotFound(PathBuf),

    /// File exists but has no columns or no rows
    EmptyDataset(PathBuf),

    /// File could not be parsed as CSV
    MalformedCsv { path: PathBuf, message: String },

    /// Extension other than CSV
    UnsupportedFormat(String),
}

impl fmt::Display for BookstatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::NotFound(path) => write!(f, "File '{}' not found.", path.display()),
            Self::EmptyDataset(path) => write!(f, "File '{}' is empty.", path.display()),
            Self::MalformedCsv { path, message } => write!(
                f,
                "File '{}' has invalid CSV format or structure: {message}",
                path.display()
            ),
            Self::UnsupportedFormat(ext) => write!(f, "Unsupported file extension: {ext}"),
        }
    }
}

impl std::error::Error for BookstatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BookstatsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Result type alias for bookstats operations.
pub type Result<T> = std::result::Result<T, BookstatsError>;
