//! Per-subgraph validation
//!
//! Each requested subgraph gets its own trial:
//!
//! ```text
//! copy base tree → scratch
//! load base descriptor (scratch) + current descriptor
//! classify:
//!   Modified  → overwrite that one schema in scratch, compose scratch
//!   Added     → compose current tree
//!   Removed   → compose scratch unchanged (the baseline still composes)
//!   Unknown   → fail without composing
//! ```
//!
//! Trials run sequentially in request order. A failing trial is recorded
//! and the next one starts; nothing short of a bad request aborts the run.

use crate::compose::Composer;
use crate::error::{SubgraphFailure, ValidateError, ValidateResult};
use crate::report::ValidationReport;
use crate::tenant::Tenant;
use crate::tree::{copy_tree, replace_file, Snapshot};
use fedcheck_descriptor::SupergraphDescriptor;
use indexmap::IndexSet;
use std::path::{Path, PathBuf};

/// How a requested subgraph relates to the two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Listed in both: new schema against the baseline of everything else
    Modified,
    /// Listed only in the current snapshot
    Added,
    /// Listed only in the base snapshot
    Removed,
    /// Listed in neither
    Unknown,
}

impl Change {
    /// Classify `subgraph` against the base and current descriptors
    #[must_use]
    pub fn classify(
        subgraph: &str,
        base: &SupergraphDescriptor,
        current: &SupergraphDescriptor,
    ) -> Self {
        match (base.contains(subgraph), current.contains(subgraph)) {
            (true, true) => Self::Modified,
            (false, true) => Self::Added,
            (true, false) => Self::Removed,
            (false, false) => Self::Unknown,
        }
    }
}

enum Verdict {
    Composed { success: bool, stderr: String },
    Unknown,
}

/// Validates subgraphs of one tenant against a base and a current tree
#[derive(Debug)]
pub struct SubgraphValidator<C> {
    base_dir: PathBuf,
    current_dir: PathBuf,
    tenant: Tenant,
    composer: C,
}

impl<C: Composer> SubgraphValidator<C> {
    /// Create a validator over two extracted snapshot trees
    pub fn new(
        base_dir: impl Into<PathBuf>,
        current_dir: impl Into<PathBuf>,
        tenant: Tenant,
        composer: C,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            current_dir: current_dir.into(),
            tenant,
            composer,
        }
    }

    /// Validate one subgraph
    ///
    /// # Errors
    /// The subgraph's failure, ready to be recorded in a report.
    pub fn validate_subgraph(&self, subgraph: &str) -> Result<(), SubgraphFailure> {
        tracing::info!(subgraph, tenant = %self.tenant, "--- Validating subgraph");
        match self.trial(subgraph) {
            Ok(Verdict::Composed { success: true, .. }) => {
                tracing::info!(subgraph, "composition succeeded");
                Ok(())
            }
            Ok(Verdict::Composed { stderr, .. }) => Err(SubgraphFailure::Composition {
                subgraph: subgraph.to_string(),
                stderr,
            }),
            Ok(Verdict::Unknown) => Err(SubgraphFailure::UnknownSubgraph {
                subgraph: subgraph.to_string(),
            }),
            Err(source) => Err(SubgraphFailure::Setup {
                subgraph: subgraph.to_string(),
                source,
            }),
        }
    }

    /// Validate every subgraph in order, collecting failures
    pub fn validate_all<S: AsRef<str>>(&self, subgraphs: &[S]) -> ValidationReport {
        let mut report = ValidationReport::new();
        for subgraph in subgraphs {
            let subgraph = subgraph.as_ref();
            let verdict = self.validate_subgraph(subgraph);
            if let Err(failure) = &verdict {
                tracing::warn!(subgraph, error = %failure, "subgraph failed validation");
            }
            report.record(subgraph, verdict);
        }
        report
    }

    fn trial(&self, subgraph: &str) -> ValidateResult<Verdict> {
        let label: String = subgraph
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let scratch = tempfile::Builder::new()
            .prefix(&format!("{label}-validation"))
            .tempdir()
            .map_err(|e| ValidateError::io_error(std::env::temp_dir(), e))?;
        copy_tree(&self.base_dir, scratch.path())?;

        let descriptor_name = self.tenant.descriptor_file_name();
        let base = SupergraphDescriptor::load(scratch.path().join(&descriptor_name))?;
        let current = SupergraphDescriptor::load(self.current_dir.join(&descriptor_name))?;

        let change = Change::classify(subgraph, &base, &current);
        tracing::debug!(subgraph, ?change, "classified subgraph");
        let compose_dir: &Path = match change {
            Change::Modified => {
                let schema = self.tenant.schema_path(subgraph);
                let old_schema = scratch.path().join(&schema);
                let new_schema = self.current_dir.join(&schema);
                tracing::info!(
                    from = %new_schema.display(),
                    to = %old_schema.display(),
                    "copying new schema"
                );
                replace_file(&new_schema, &old_schema)?;
                scratch.path()
            }
            Change::Removed => scratch.path(),
            Change::Added => self.current_dir.as_path(),
            Change::Unknown => return Ok(Verdict::Unknown),
        };

        let config = compose_dir.join(&descriptor_name);
        let outcome = self.composer.compose(&config, compose_dir)?;
        Ok(Verdict::Composed {
            success: outcome.success,
            stderr: outcome.stderr,
        })
    }
}

/// Validate `subgraphs` of `tenant` against two already extracted trees
pub fn validate_subgraphs<C: Composer, S: AsRef<str>>(
    subgraphs: &[S],
    base_dir: &Path,
    current_dir: &Path,
    tenant: Tenant,
    composer: C,
) -> ValidationReport {
    SubgraphValidator::new(base_dir, current_dir, tenant, composer).validate_all(subgraphs)
}

/// Split a comma-separated subgraph list
///
/// Items are trimmed, empty items dropped and repeats removed, keeping
/// the first occurrence.
///
/// # Errors
/// `ValidateError::NoSubgraphs` if nothing is left.
pub fn parse_subgraph_list(raw: &str) -> ValidateResult<Vec<String>> {
    let names: IndexSet<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        return Err(ValidateError::NoSubgraphs);
    }
    Ok(names.into_iter().collect())
}

/// A checked validation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    /// Archive of the baseline snapshot
    pub base_archive: PathBuf,
    /// Archive of the snapshot under validation
    pub current_archive: PathBuf,
    /// Subgraphs to validate, in order
    pub subgraphs: Vec<String>,
    /// Tenant owning the supergraph
    pub tenant: Tenant,
}

impl ValidationRequest {
    /// Check raw arguments: tenant first, then archive paths, then names
    ///
    /// # Errors
    /// `InvalidTenant`, `MissingArgument` or `NoSubgraphs`.
    pub fn parse(
        tenant: &str,
        base_archive: &str,
        current_archive: &str,
        subgraphs: &str,
    ) -> ValidateResult<Self> {
        let tenant = tenant.parse::<Tenant>()?;
        if base_archive.is_empty() {
            return Err(ValidateError::MissingArgument("base-subgraphs-tar"));
        }
        if current_archive.is_empty() {
            return Err(ValidateError::MissingArgument("current-subgraphs-tar"));
        }
        let subgraphs = parse_subgraph_list(subgraphs)?;
        Ok(Self {
            base_archive: PathBuf::from(base_archive),
            current_archive: PathBuf::from(current_archive),
            subgraphs,
            tenant,
        })
    }

    /// Extract both archives and validate every requested subgraph
    ///
    /// Both extraction directories are removed before returning.
    ///
    /// # Errors
    /// Extraction failures; per-subgraph failures land in the report.
    pub fn run<C: Composer>(&self, composer: C) -> ValidateResult<ValidationReport> {
        let base = Snapshot::extract(&self.base_archive, "base-schemas")?;
        let current = Snapshot::extract(&self.current_archive, "current-schemas")?;
        Ok(validate_subgraphs(
            &self.subgraphs,
            base.path(),
            current.path(),
            self.tenant,
            composer,
        ))
    }
}
