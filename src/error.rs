//! Error types for tree comparison and purging.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by enumeration, reconciliation, comparison and purging
#[derive(Debug, Error)]
pub enum TreeCompareError {
    #[error("Directory does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Both roots are the same directory: {0}")]
    SameDirectory(PathBuf),

    #[error("Cannot compare a file with itself: {0}")]
    SameFile(PathBuf),

    /// A deletion target was computed outside its root. Indicates a bug.
    #[error("Internal consistency fault: {target} escapes root {root}")]
    InternalConsistency { root: PathBuf, target: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TreeCompareError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TreeCompareError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the kinds a user can cause with bad arguments
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            TreeCompareError::NotFound(_)
                | TreeCompareError::NotADirectory(_)
                | TreeCompareError::SameDirectory(_)
                | TreeCompareError::SameFile(_)
        )
    }

    /// True for defects that must stop the program
    pub fn is_internal(&self) -> bool {
        matches!(self, TreeCompareError::InternalConsistency { .. })
    }
}

impl From<config::ConfigError> for TreeCompareError {
    fn from(err: config::ConfigError) -> Self {
        TreeCompareError::Config(err.to_string())
    }
}

pub type Result<T, E = TreeCompareError> = std::result::Result<T, E>;
