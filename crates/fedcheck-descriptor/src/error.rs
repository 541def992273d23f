//! Error types for descriptor synthesis and the YAML codec
//!
//! Provides error handling for:
//! - Malformed `name=path` arguments
//! - Descriptor file reads and writes
//! - YAML encoding and decoding

use std::path::PathBuf;

/// Errors produced while building, reading or writing a supergraph descriptor
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// Argument did not split into exactly two `=`-delimited fields
    #[error("{0} is invalid argument, need arguments in <subgraph-name>=</path/to/schema>")]
    MalformedPair(String),

    /// Argument split correctly but the name or path is empty
    #[error("{0} is invalid argument, subgraph name and schema path must both be non-empty")]
    EmptyField(String),

    /// Same subgraph name supplied more than once
    #[error("subgraph {0} is specified more than once")]
    DuplicateSubgraph(String),

    /// IO error reading or writing a descriptor file
    #[error("io error on {path}: {source}")]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// YAML encoding or decoding failed
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DescriptorError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error stems from bad caller input rather than the environment
    #[inline]
    #[must_use]
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedPair(_) | Self::EmptyField(_) | Self::DuplicateSubgraph(_)
        )
    }
}

/// Result type alias for descriptor operations
pub type DescriptorResult<T> = Result<T, DescriptorError>;
