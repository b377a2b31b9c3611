//! Error type shared by every stage of dataset generation.

use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a generation run.
///
/// None of these are recoverable mid-run: the fix is to correct the literal
/// parameters or the filesystem and rerun.
#[derive(Debug, Error)]
pub enum GoldenError {
    /// Bad grid or shape parameters.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An artifact could not be written or read.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The field oracle rejected its inputs.
    #[error("field oracle rejected input: {0}")]
    Oracle(String),

    /// An artifact on disk is not a valid coordinate matrix.
    #[error("cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The configuration file is not valid YAML for a generator configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GoldenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GoldenError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GoldenError>;
