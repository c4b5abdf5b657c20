use std::path::PathBuf;
use thiserror::Error;

use crate::sheet::LoadError;

/// Fatal pipeline errors. Row-level data problems are never errors; they
/// are dropped and counted in the run summary instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(
        "County data not found: {}. Run from project root and ensure raw data is in data/raw/ per data/README.md.",
        .path.display()
    )]
    MissingInput { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("failed to write {}: {reason}", .path.display())]
    FileWrite { path: PathBuf, reason: String },
}

impl PipelineError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: LoadError) -> Self {
        PipelineError::FileRead {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        PipelineError::FileWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
