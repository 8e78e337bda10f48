//! Indexer type definitions.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::MatcherError;
use crate::format::FormatError;

/// A catalog file that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadFailure {
    pub path: PathBuf,
    pub message: String,
}

impl LoadFailure {
    #[must_use]
    pub fn new(path: PathBuf, error: &impl std::fmt::Display) -> Self {
        Self { path, message: error.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Invalid file patterns: {0}")]
    Matcher(#[from] MatcherError),

    /// Error when failing to read a file
    #[error("Failed to read file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("Workspace root does not exist: {0:?}")]
    InvalidRoot(PathBuf),
}
