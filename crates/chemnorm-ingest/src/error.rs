use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse variant table {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{path} row {row}: column '{column}' has non-numeric value '{value}'")]
    InvalidNumber {
        path: PathBuf,
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("{path} row {row}: blank canonical form")]
    BlankCanonicalForm { path: PathBuf, row: usize },

    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: &Path, error: &csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
