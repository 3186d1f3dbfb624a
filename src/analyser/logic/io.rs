use crate::error::{BookstatsError, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATASET: &str = "Dataset_Books.csv";

/// Locates the catalog file, also trying the parent directory so the tool
/// works when launched from a `tests/` or `target/` subdirectory.
pub fn resolve_dataset_path(path: &Path) -> Result<PathBuf> {
    resolve_from(Path::new(""), path)
}

/// Resolves `path` as if the working directory were `base`.
pub(crate) fn resolve_from(base: &Path, path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(BookstatsError::InvalidPath(
            "No file path provided.".to_owned(),
        ));
    }
    let direct = base.join(path);
    if direct.exists() {
        return Ok(direct);
    }

    let parent_candidate = base.join("..").join(path);
    if path.is_relative() && parent_candidate.exists() {
        tracing::debug!(path = %parent_candidate.display(), "using dataset from parent directory");
        return Ok(parent_candidate);
    }

    Err(BookstatsError::NotFound(path.to_path_buf()))
}

/// Loads a catalog into a `DataFrame`.
///
/// # Errors
///
/// Fails when the file is missing, is not a CSV, cannot be parsed, or holds
/// no columns or no rows.
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    read_dataset(resolve_dataset_path(path)?)
}

/// Reads an already resolved catalog path.
pub(crate) fn read_dataset(path: PathBuf) -> Result<DataFrame> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !matches!(ext.as_str(), "csv" | "") {
        return Err(BookstatsError::UnsupportedFormat(ext));
    }

    if std::fs::metadata(&path)?.len() == 0 {
        return Err(BookstatsError::EmptyDataset(path));
    }

    let df = read_csv(&path).map_err(|e| match e {
        PolarsError::NoData(_) => BookstatsError::EmptyDataset(path.clone()),
        other => BookstatsError::MalformedCsv {
            path: path.clone(),
            message: other.to_string(),
        },
    })?;

    if df.width() == 0 || df.height() == 0 {
        return Err(BookstatsError::EmptyDataset(path));
    }

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded dataset"
    );
    Ok(df)
}

fn read_csv(path: &Path) -> PolarsResult<DataFrame> {
    LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10_000))
        .with_has_header(true)
        .finish()?
        .collect()
}
