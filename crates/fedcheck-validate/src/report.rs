//! Aggregated validation results

use crate::error::SubgraphFailure;
use indexmap::IndexMap;
use std::fmt::Write as _;

/// Banner prefix printed before the overall verdict
pub const RESULT_BANNER: &str = "--- Subgraphs validation result:";

/// Failures keyed by subgraph name, in the order subgraphs were checked
#[derive(Debug, Default)]
pub struct ValidationReport {
    checked: Vec<String>,
    failures: IndexMap<String, SubgraphFailure>,
}

impl ValidationReport {
    /// Empty report
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the verdict for one subgraph
    pub fn record(&mut self, subgraph: &str, verdict: Result<(), SubgraphFailure>) {
        self.checked.push(subgraph.to_string());
        if let Err(failure) = verdict {
            self.failures.insert(subgraph.to_string(), failure);
        }
    }

    /// Every subgraph passed
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Subgraphs checked, in order
    #[must_use]
    pub fn checked(&self) -> &[String] {
        &self.checked
    }

    /// Failing subgraphs, in order
    #[must_use]
    pub fn failures(&self) -> &IndexMap<String, SubgraphFailure> {
        &self.failures
    }

    /// Failure recorded for `subgraph`
    #[must_use]
    pub fn failure(&self, subgraph: &str) -> Option<&SubgraphFailure> {
        self.failures.get(subgraph)
    }

    /// Human-readable summary: banner, then each failing subgraph followed
    /// by its full diagnostics
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.is_success() {
            let _ = writeln!(out, "{RESULT_BANNER} SUCCESS");
            let _ = writeln!(out, "Subgraphs validation passed!");
        } else {
            let _ = writeln!(out, "{RESULT_BANNER} FAILED");
            let _ = writeln!(out, "Subgraph validation failed for the following subgraphs!");
            for (subgraph, failure) in &self.failures {
                let _ = writeln!(out, "{subgraph}");
                let _ = writeln!(out, "{failure}");
            }
        }
        out
    }
}
