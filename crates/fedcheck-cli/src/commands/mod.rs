//! One module per binary
//!
//! Every module exposes `command()` building its clap definition and
//! `run(&ArgMatches)` executing it.

pub mod archive;
pub mod supergraph;
pub mod validate;
