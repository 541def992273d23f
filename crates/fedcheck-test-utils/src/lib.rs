//! Testing utilities for fedcheck workspace
//!
//! Shared snapshot fixtures and a scripted composer.

#![allow(missing_docs)]

use fedcheck_archive::{create_archive, SchemaEntryNaming};
use fedcheck_descriptor::{SubgraphSpec, SupergraphDescriptor, DEFAULT_FEDERATION_VERSION};
use fedcheck_validate::{Composer, CompositionOutcome, Tenant, ValidateError, ValidateResult};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Marker that makes `FakeComposer` fail when present in a composed schema
pub const BROKEN_MARKER: &str = "BROKEN";

/// Minimal valid-looking SDL for a subgraph
pub fn sdl(subgraph: &str) -> String {
    format!("type Query {{ {subgraph}: String }}\n")
}

/// Write a tenant's descriptor and schema files under `root`
pub fn write_snapshot(root: &Path, tenant: Tenant, subgraphs: &[(&str, &str)]) -> Vec<SubgraphSpec> {
    let specs: Vec<SubgraphSpec> = subgraphs
        .iter()
        .map(|(name, _)| SubgraphSpec::new(*name, tenant.schema_path(name)))
        .collect();
    for (spec, (_, body)) in specs.iter().zip(subgraphs) {
        let path = root.join(spec.schema());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }
    SupergraphDescriptor::from_specs(&specs, DEFAULT_FEDERATION_VERSION)
        .unwrap()
        .store(root.join(tenant.descriptor_file_name()))
        .unwrap();
    specs
}

/// A snapshot tree in its own temporary directory
pub struct SnapshotFixture {
    dir: TempDir,
    tenant: Tenant,
    specs: Vec<SubgraphSpec>,
}

impl SnapshotFixture {
    pub fn new(tenant: Tenant, subgraphs: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let specs = write_snapshot(dir.path(), tenant, subgraphs);
        Self { dir, tenant, specs }
    }

    /// Snapshot where every subgraph gets `sdl(name)`
    pub fn with_defaults(tenant: Tenant, names: &[&str]) -> Self {
        let bodies: Vec<String> = names.iter().map(|n| sdl(n)).collect();
        let subgraphs: Vec<(&str, &str)> = names
            .iter()
            .copied()
            .zip(bodies.iter().map(String::as_str))
            .collect();
        Self::new(tenant, &subgraphs)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Package the snapshot the way the build does
    pub fn archive(&self, output: &Path) {
        create_archive(
            output,
            &self.path().join(self.tenant.descriptor_file_name()),
            &self.specs,
            Some(self.path()),
            SchemaEntryNaming::RelativePath,
        )
        .unwrap();
    }
}

/// One observed composition request
#[derive(Debug, Clone)]
pub struct ComposeCall {
    pub config: PathBuf,
    pub work_dir: PathBuf,
    /// Subgraph name → schema text, as seen at composition time
    pub schemas: BTreeMap<String, String>,
}

/// Composer that inspects the tree instead of running rover
///
/// Fails when any composed schema contains a registered marker.
#[derive(Debug, Default)]
pub struct FakeComposer {
    failures: Vec<(String, String)>,
    calls: Mutex<Vec<ComposeCall>>,
}

impl FakeComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `stderr` whenever a schema contains `marker`
    pub fn failing_on(mut self, marker: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.failures.push((marker.into(), stderr.into()));
        self
    }

    pub fn calls(&self) -> Vec<ComposeCall> {
        self.calls.lock().clone()
    }
}

impl Composer for FakeComposer {
    fn compose(&self, config: &Path, work_dir: &Path) -> ValidateResult<CompositionOutcome> {
        let descriptor = SupergraphDescriptor::load(config)?;
        let mut schemas = BTreeMap::new();
        for name in descriptor.names() {
            let Some(file) = descriptor.schema_file(name) else {
                continue;
            };
            let path = work_dir.join(file);
            let text = fs::read_to_string(&path).map_err(|e| ValidateError::io_error(&path, e))?;
            schemas.insert(name.to_string(), text);
        }

        let failure = self
            .failures
            .iter()
            .find(|(marker, _)| schemas.values().any(|s| s.contains(marker.as_str())));
        let outcome = match failure {
            Some((_, stderr)) => CompositionOutcome::failed(1, stderr.clone()),
            None => CompositionOutcome::passed(),
        };

        self.calls.lock().push(ComposeCall {
            config: config.to_path_buf(),
            work_dir: work_dir.to_path_buf(),
            schemas,
        });
        Ok(outcome)
    }
}
