//! Errors raised while loading a catalog file.

use std::path::PathBuf;

use thiserror::Error;


#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("dataset not found at {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no complete rows in {path} ({dropped} incomplete rows dropped)")]
    Empty { path: PathBuf, dropped: usize },
}
