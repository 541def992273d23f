//! Supergraph descriptor model and YAML codec
//!
//! The descriptor is the file handed to `rover supergraph compose --config`.
//! Subgraphs are kept in a sorted map so the encoded YAML is stable across
//! runs, which keeps downstream archives reproducible.

use crate::error::{DescriptorError, DescriptorResult};
use crate::pair::SubgraphSpec;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Federation spec version used when none is requested
pub const DEFAULT_FEDERATION_VERSION: &str = "=2.9.0";

/// Routing URL written for every subgraph; composition never dials it
pub const PLACEHOLDER_ROUTING_URL: &str = "routing-url-not-required";

/// Supergraph composition config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupergraphDescriptor {
    /// Federation composition spec version, e.g. `=2.9.0`
    pub federation_version: String,
    /// Subgraph name → routing metadata and schema pointer
    #[serde(default)]
    pub subgraphs: BTreeMap<String, SubgraphEntry>,
}

/// One subgraph record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgraphEntry {
    /// Opaque routing URL
    pub routing_url: String,
    /// Schema document location
    pub schema: SchemaSource,
}

/// Schema document pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSource {
    /// Path, resolved against the directory composition runs in
    pub file: PathBuf,
}

impl SubgraphEntry {
    /// Entry with the placeholder routing URL
    #[inline]
    #[must_use]
    pub fn with_schema(file: impl Into<PathBuf>) -> Self {
        Self {
            routing_url: PLACEHOLDER_ROUTING_URL.to_string(),
            schema: SchemaSource { file: file.into() },
        }
    }
}

impl SupergraphDescriptor {
    /// Empty descriptor for the given federation version
    #[inline]
    #[must_use]
    pub fn new(federation_version: impl Into<String>) -> Self {
        Self {
            federation_version: federation_version.into(),
            subgraphs: BTreeMap::new(),
        }
    }

    /// Build a descriptor from parsed `name=path` arguments
    ///
    /// # Errors
    /// `DescriptorError::DuplicateSubgraph` if a name appears twice.
    pub fn from_specs<'a>(
        specs: impl IntoIterator<Item = &'a SubgraphSpec>,
        federation_version: impl Into<String>,
    ) -> DescriptorResult<Self> {
        let mut descriptor = Self::new(federation_version);
        for spec in specs {
            match descriptor.subgraphs.entry(spec.name().to_string()) {
                Entry::Occupied(_) => {
                    return Err(DescriptorError::DuplicateSubgraph(spec.name().to_string()))
                }
                Entry::Vacant(slot) => {
                    slot.insert(SubgraphEntry::with_schema(spec.schema()));
                }
            }
        }
        Ok(descriptor)
    }

    /// Whether a subgraph with this name is listed
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.subgraphs.contains_key(name)
    }

    /// Schema file recorded for a subgraph
    #[must_use]
    pub fn schema_file(&self, name: &str) -> Option<&Path> {
        self.subgraphs.get(name).map(|s| s.schema.file.as_path())
    }

    /// Subgraph names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subgraphs.keys().map(String::as_str)
    }

    /// Decode from YAML text
    ///
    /// # Errors
    /// Returns `DescriptorError::Yaml` on malformed input.
    pub fn from_yaml_str(yaml: &str) -> DescriptorResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Encode as YAML text
    ///
    /// # Errors
    /// Returns `DescriptorError::Yaml` if encoding fails.
    pub fn to_yaml_string(&self) -> DescriptorResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Read and decode a descriptor file
    ///
    /// # Errors
    /// IO or YAML failure.
    pub fn load(path: impl AsRef<Path>) -> DescriptorResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| DescriptorError::io_error(path, e))?;
        Self::from_yaml_str(&content)
    }

    /// Encode and write a descriptor file, replacing any existing one
    ///
    /// # Errors
    /// IO or YAML failure.
    pub fn store(&self, path: impl AsRef<Path>) -> DescriptorResult<()> {
        let path = path.as_ref();
        let yaml = self.to_yaml_string()?;
        std::fs::write(path, yaml).map_err(|e| DescriptorError::io_error(path, e))
    }
}

/// Build a descriptor from raw `name=path` arguments
///
/// No partial success: the first malformed or duplicate entry fails the
/// whole call.
///
/// # Errors
/// `MalformedPair`, `EmptyField` or `DuplicateSubgraph` naming the entry.
pub fn synthesize<I, S>(pairs: I, federation_version: &str) -> DescriptorResult<SupergraphDescriptor>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let specs = SubgraphSpec::parse_all(pairs)?;
    SupergraphDescriptor::from_specs(&specs, federation_version)
}
