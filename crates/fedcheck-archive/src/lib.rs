//! Subgraph schema archives
//!
//! Hermetic packaging of a supergraph descriptor plus its subgraph schema
//! files into a tar archive, and extraction of such archives into a
//! working tree.
//!
//! # Architecture
//!
//! ```text
//! descriptor + schemas → create_archive → schemas.tar → extract → tree/
//!                              ↑
//!                       WorkingDirGuard (schemas dir)
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod reader;
pub mod workdir;
pub mod writer;

pub use error::{ArchiveError, ArchiveResult};
pub use reader::{extract, ExtractSummary};
pub use workdir::WorkingDirGuard;
pub use writer::{
    create_archive, ArchiveSummary, SchemaEntryNaming, DIR_MODE, FILE_MODE, PINNED_MTIME,
    PINNED_OWNER,
};
