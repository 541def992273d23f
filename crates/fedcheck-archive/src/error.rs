//! Error types for archive creation and extraction

use std::path::PathBuf;

/// Errors during archive creation or extraction
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// IO error on an archive, source file or extraction target
    #[error("io error on {path}: {source}")]
    Io {
        /// Path being operated on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Entry path escapes the extraction root or is unusable as a name
    #[error("unsafe archive entry path: {0}")]
    UnsafeEntryPath(PathBuf),

    /// Switching into or out of the schemas directory failed
    #[error("failed to change working directory to {path}: {source}")]
    WorkingDirectory {
        /// Directory we tried to enter
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ArchiveError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create working-directory error for path
    pub fn working_directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WorkingDirectory {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;
