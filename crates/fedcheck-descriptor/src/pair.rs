//! `name=path` subgraph arguments

use crate::error::DescriptorError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One `<subgraph-name>=<path/to/schema>` argument
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubgraphSpec {
    name: String,
    schema: PathBuf,
}

impl SubgraphSpec {
    /// Create from already separated parts
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, schema: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
        }
    }

    /// Subgraph name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema document path, exactly as given
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Path {
        &self.schema
    }

    /// Parse every argument, failing on the first malformed one
    ///
    /// # Errors
    /// Returns the error for the first entry that does not parse.
    pub fn parse_all<I, S>(args: I) -> Result<Vec<Self>, DescriptorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter().map(|arg| arg.as_ref().parse()).collect()
    }
}

impl FromStr for SubgraphSpec {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('=').collect();
        let [name, schema] = parts.as_slice() else {
            return Err(DescriptorError::MalformedPair(s.to_string()));
        };
        if name.is_empty() || schema.is_empty() {
            return Err(DescriptorError::EmptyField(s.to_string()));
        }
        Ok(Self::new(*name, *schema))
    }
}

impl fmt::Display for SubgraphSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.schema.display())
    }
}
