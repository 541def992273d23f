//! Supergraph change validation
//!
//! Proves that every changed subgraph still composes into the supergraph,
//! each one in isolation against the unchanged baseline of every other
//! subgraph.
//!
//! # Pipeline
//!
//! ```text
//! base.tar ──┐                         ┌─ Modified → scratch copy of base + new schema
//!            ├─ extract → classify ────┼─ Removed  → scratch copy of base
//! current.tar┘                         └─ Added    → current tree
//!                                             ↓
//!                                   Composer (rover supergraph compose)
//!                                             ↓
//!                                     ValidationReport
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use fedcheck_validate::{RoverComposer, ValidationRequest};
//!
//! let request = ValidationRequest::parse("FIRST_PARTY", "base.tar", "current.tar", "users,orders")?;
//! let report = request.run(RoverComposer::locate(None))?;
//! print!("{}", report.render());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod compose;
pub mod error;
pub mod report;
pub mod tenant;
pub mod tree;
pub mod validator;

pub use compose::{Composer, CompositionOutcome, RoverComposer, LICENSE_ACCEPT, LICENSE_ENV, ROVER_PATH_ENV};
pub use error::{SubgraphFailure, ValidateError, ValidateResult};
pub use report::{ValidationReport, RESULT_BANNER};
pub use tenant::Tenant;
pub use tree::{copy_tree, Snapshot};
pub use validator::{
    parse_subgraph_list, validate_subgraphs, Change, SubgraphValidator, ValidationRequest,
};
