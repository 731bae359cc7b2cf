use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DygraphFragmentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV path has no file name: {0}")]
    InvalidCsvPath(PathBuf),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DygraphFragmentError>;
