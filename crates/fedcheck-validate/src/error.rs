//! Error types for subgraph validation
//!
//! Two layers:
//! - `ValidateError`: fatal to the invocation when raised while preparing
//!   the run; inside one subgraph's trial it is captured instead.
//! - `SubgraphFailure`: the per-subgraph verdict stored in the report.

use fedcheck_archive::ArchiveError;
use fedcheck_descriptor::DescriptorError;
use std::path::PathBuf;

/// Errors raised while preparing or running validation
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// Tenant literal is not one of the recognised ones
    #[error("Invalid tenant {0}")]
    InvalidTenant(String),

    /// Required argument was empty
    #[error("{0} must be specified!")]
    MissingArgument(&'static str),

    /// No subgraph names left after parsing the list
    #[error("at least one subgraph must be passed for validation")]
    NoSubgraphs,

    /// IO error on a snapshot tree or scratch directory
    #[error("io error on {path}: {source}")]
    Io {
        /// Path being operated on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Descriptor could not be read or decoded
    #[error("descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    /// Snapshot archive could not be extracted
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Composition tool could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program we tried to start
        program: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ValidateError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error stems from bad caller input
    #[inline]
    #[must_use]
    pub fn is_argument_error(&self) -> bool {
        match self {
            Self::InvalidTenant(_) | Self::MissingArgument(_) | Self::NoSubgraphs => true,
            Self::Descriptor(err) => err.is_argument_error(),
            _ => false,
        }
    }
}

/// Why one subgraph did not pass
#[derive(Debug, thiserror::Error)]
pub enum SubgraphFailure {
    /// Composition tool exited non-zero
    #[error("subgraph validation failed for {subgraph}. The composition error is \n{stderr}")]
    Composition {
        /// Subgraph under validation
        subgraph: String,
        /// Tool's standard error, verbatim
        stderr: String,
    },

    /// Name is listed in neither the base nor the current descriptor
    #[error("subgraph validation failed for {subgraph}. It is not listed in the base or current supergraph config")]
    UnknownSubgraph {
        /// Requested name
        subgraph: String,
    },

    /// The trial could not be set up or the tool could not be run
    #[error("subgraph validation failed for {subgraph}: {source}")]
    Setup {
        /// Subgraph under validation
        subgraph: String,
        /// What went wrong
        #[source]
        source: ValidateError,
    },
}

impl SubgraphFailure {
    /// Subgraph this failure belongs to
    #[must_use]
    pub fn subgraph(&self) -> &str {
        match self {
            Self::Composition { subgraph, .. }
            | Self::UnknownSubgraph { subgraph }
            | Self::Setup { subgraph, .. } => subgraph,
        }
    }

    /// Captured composition diagnostics, if the tool ran
    #[must_use]
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Composition { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

/// Result type alias for validation operations
pub type ValidateResult<T> = Result<T, ValidateError>;
