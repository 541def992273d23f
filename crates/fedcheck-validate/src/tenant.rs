//! Tenants and the snapshot tree layout they imply
//!
//! ```text
//! <root>/
//!   <TENANT>_rover.yaml
//!   <TENANT>/schemas/<subgraph>/schema.sdl
//! ```

use crate::error::ValidateError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Namespace owning one supergraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tenant {
    /// `FIRST_PARTY`
    FirstParty,
    /// `ADMIN`
    Admin,
}

impl Tenant {
    /// All recognised tenants
    pub const ALL: [Tenant; 2] = [Tenant::FirstParty, Tenant::Admin];

    /// Literal used on the command line and in file names
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstParty => "FIRST_PARTY",
            Self::Admin => "ADMIN",
        }
    }

    /// Descriptor file name at the root of a snapshot tree
    #[must_use]
    pub fn descriptor_file_name(self) -> String {
        format!("{}_rover.yaml", self.as_str())
    }

    /// Schema location of `subgraph`, relative to a snapshot root
    #[must_use]
    pub fn schema_path(self, subgraph: &str) -> PathBuf {
        PathBuf::from(format!("{}/schemas/{subgraph}/schema.sdl", self.as_str()))
    }
}

impl FromStr for Tenant {
    type Err = ValidateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidateError::InvalidTenant(s.to_string()))
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_literals() {
        assert_eq!("FIRST_PARTY".parse::<Tenant>().unwrap(), Tenant::FirstParty);
        assert_eq!("ADMIN".parse::<Tenant>().unwrap(), Tenant::Admin);
    }

    #[test]
    fn rejects_other_literals() {
        for raw in ["OTHER", "admin", "", " ADMIN"] {
            let err = raw.parse::<Tenant>().unwrap_err();
            assert!(matches!(err, ValidateError::InvalidTenant(ref v) if v == raw));
        }
    }

    #[test]
    fn layout_paths() {
        assert_eq!(Tenant::Admin.descriptor_file_name(), "ADMIN_rover.yaml");
        assert_eq!(
            Tenant::FirstParty.schema_path("users"),
            PathBuf::from("FIRST_PARTY/schemas/users/schema.sdl")
        );
        assert_eq!(Tenant::FirstParty.to_string(), "FIRST_PARTY");
    }
}
