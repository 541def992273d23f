//! Supergraph descriptor
//!
//! Model, synthesis and YAML codec for the config file consumed by
//! `rover supergraph compose`.
//!
//! # Example
//!
//! ```rust
//! use fedcheck_descriptor::{synthesize, DEFAULT_FEDERATION_VERSION};
//!
//! let descriptor = synthesize(
//!     ["users=FIRST_PARTY/schemas/users/schema.sdl"],
//!     DEFAULT_FEDERATION_VERSION,
//! )?;
//! assert!(descriptor.contains("users"));
//! # Ok::<(), fedcheck_descriptor::DescriptorError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod descriptor;
pub mod error;
pub mod pair;

pub use descriptor::{
    synthesize, SchemaSource, SubgraphEntry, SupergraphDescriptor, DEFAULT_FEDERATION_VERSION,
    PLACEHOLDER_ROUTING_URL,
};
pub use error::{DescriptorError, DescriptorResult};
pub use pair::SubgraphSpec;
