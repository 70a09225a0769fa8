use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to read tabular data: {source}")]
    Polars {
        #[from]
        source: polars::error::PolarsError,
    },

    #[error("failed to parse {}: {details}", .path.display())]
    Parse { path: PathBuf, details: String },
}

impl Error {
    pub fn parse(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            details: details.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
