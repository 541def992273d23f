//! `validate-subgraphs`: compose each changed subgraph against the baseline

use crate::{EXIT_FAILURE, EXIT_SUCCESS};
use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use fedcheck_validate::{RoverComposer, ValidationRequest};
use std::path::PathBuf;

/// Command definition
///
/// Every value defaults to empty so that missing arguments are reported by
/// [`ValidationRequest::parse`], tenant first.
pub fn command() -> Command {
    Command::new("validate-subgraphs")
        .about("Validate that each changed subgraph still composes into the supergraph")
        .arg(
            Arg::new("base-subgraphs-tar")
                .long("base-subgraphs-tar")
                .default_value("")
                .help("Tar file with the base subgraph schemas and rover config"),
        )
        .arg(
            Arg::new("current-subgraphs-tar")
                .long("current-subgraphs-tar")
                .default_value("")
                .help("Tar file with the subgraph schemas and rover config of the current commit"),
        )
        .arg(
            Arg::new("subgraphs")
                .long("subgraphs")
                .default_value("")
                .help("Comma separated list of subgraphs to validate individually"),
        )
        .arg(
            Arg::new("tenant")
                .long("tenant")
                .default_value("")
                .help("The supergraph tenant (FIRST_PARTY or ADMIN)"),
        )
        .arg(
            Arg::new("rover")
                .long("rover")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to the rover binary (defaults to ROVER_PATH, runfiles, then PATH)"),
        )
}

fn value<'a>(args: &'a ArgMatches, id: &str) -> &'a str {
    args.get_one::<String>(id).map_or("", String::as_str)
}

/// Validate and print the report; exits 1 if any subgraph failed
///
/// # Errors
/// Bad arguments or unreadable archives. Per-subgraph failures are part of
/// the report instead.
pub fn run(args: &ArgMatches) -> anyhow::Result<u8> {
    let request = ValidationRequest::parse(
        value(args, "tenant"),
        value(args, "base-subgraphs-tar"),
        value(args, "current-subgraphs-tar"),
        value(args, "subgraphs"),
    )?;
    let composer = RoverComposer::locate(args.get_one::<PathBuf>("rover").map(PathBuf::as_path));
    tracing::info!(
        tenant = %request.tenant,
        subgraphs = request.subgraphs.len(),
        rover = %composer.program().display(),
        "validating subgraphs"
    );

    let report = request
        .run(&composer)
        .context("Couldn't extract subgraphs tar")?;
    print!("{}", report.render());

    Ok(if report.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    })
}
