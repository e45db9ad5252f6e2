//! Error types for screwbreach.
//!
//! Every failure aborts the batch it occurs in; nothing here is retried or
//! recovered locally.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`BreachError`].
pub type Result<T> = std::result::Result<T, BreachError>;

/// Errors that can occur while loading meshes or analyzing screws.
#[derive(Error, Debug)]
pub enum BreachError {
    /// A point set handed to the distance engine or side detector has no points.
    #[error("point set '{name}' is empty")]
    EmptyPointSet {
        /// Which point set (medial, lateral, or a screw id).
        name: String,
    },

    /// Error loading a mesh from a file or archive entry.
    #[error("failed to load mesh from {path}: {message}")]
    Load {
        /// The file path (archive entries are shown as `archive/entry`).
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported mesh file format.
    #[error("unsupported file format '{extension}' for {path}")]
    UnsupportedFormat {
        /// The file path.
        path: PathBuf,
        /// The file extension.
        extension: String,
    },

    /// Clearance tolerance is negative, NaN or infinite.
    #[error("invalid tolerance {value}: must be a finite, non-negative number")]
    InvalidTolerance {
        /// The rejected value.
        value: f64,
    },

    /// A screw archive could not be opened or read.
    #[error("failed to read archive {path}: {message}")]
    Archive {
        /// The archive path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BreachError {
    /// Create an empty point set error.
    pub fn empty(name: impl Into<String>) -> Self {
        BreachError::EmptyPointSet { name: name.into() }
    }

    /// Create a load error for `path`.
    pub fn load<P: Into<PathBuf>, M: std::fmt::Display>(path: P, message: M) -> Self {
        BreachError::Load {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error came from reading a mesh source.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            BreachError::Load { .. }
                | BreachError::UnsupportedFormat { .. }
                | BreachError::Archive { .. }
        )
    }
}
