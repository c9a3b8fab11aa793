//! Error types for a generation run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generator operations
pub type GenResult<T> = Result<T, GenError>;

/// Everything that can abort a generation run.
///
/// Schema ambiguities (name collisions, mixed-shape arrays) are not errors;
/// they end up in [`crate::collect::Registry::warnings`].
#[derive(Error, Debug)]
pub enum GenError {
    /// Input text is not well-formed JSON
    #[error("malformed JSON at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Config file does not describe valid generator options
    #[error("invalid config {file:?} at {path}: {source}")]
    Config {
        file: PathBuf,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Input or config file could not be read
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Package directory could not be created
    #[error("failed to create directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generated file could not be written
    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    /// True for failures that happened while touching the filesystem.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            GenError::Read { .. } | GenError::CreateDir { .. } | GenError::Write { .. }
        )
    }
}
