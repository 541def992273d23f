//! `subgraphs-tar`: package a descriptor and its schemas

use crate::EXIT_SUCCESS;
use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use fedcheck_archive::{create_archive, SchemaEntryNaming};
use fedcheck_descriptor::SubgraphSpec;
use std::path::PathBuf;

/// Command definition
pub fn command() -> Command {
    Command::new("subgraphs-tar")
        .about("Package a rover supergraph config and its subgraph schemas into a tar file")
        .arg(
            Arg::new("subgraph")
                .long("subgraph")
                .value_name("NAME=PATH")
                .action(ArgAction::Append)
                .help("Specify <subgraph>=<path/to/schema> for each subgraph"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The rover supergraph config file pointing at the schema files"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The tar file to write"),
        )
        .arg(
            Arg::new("schemas-dir")
                .long("schemas-dir")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory the schema paths are relative to"),
        )
        .arg(
            Arg::new("flatten-schemas")
                .long("flatten-schemas")
                .action(ArgAction::SetTrue)
                .help("Store schemas under their file name only"),
        )
}

/// Write the archive to `--output`
///
/// # Errors
/// Malformed pairs, or any file that cannot be read or written.
pub fn run(args: &ArgMatches) -> anyhow::Result<u8> {
    let specs = SubgraphSpec::parse_all(args.get_many::<String>("subgraph").unwrap_or_default())?;
    let config = args
        .get_one::<PathBuf>("config")
        .context("--config must be specified")?;
    let output = args
        .get_one::<PathBuf>("output")
        .context("--output must be specified")?;
    let schemas_dir = args.get_one::<PathBuf>("schemas-dir");
    let naming = if args.get_flag("flatten-schemas") {
        SchemaEntryNaming::BaseName
    } else {
        SchemaEntryNaming::RelativePath
    };

    create_archive(output, config, &specs, schemas_dir.map(PathBuf::as_path), naming)
        .context("Error creating tar file")?;
    Ok(EXIT_SUCCESS)
}
