//! `supergraph-config`: write a descriptor from `name=path` pairs

use crate::EXIT_SUCCESS;
use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use fedcheck_descriptor::{synthesize, DEFAULT_FEDERATION_VERSION};
use std::path::PathBuf;

/// Command definition
pub fn command() -> Command {
    Command::new("supergraph-config")
        .about("Generate a rover supergraph config from subgraph schema paths")
        .arg(
            Arg::new("subgraph")
                .long("subgraph")
                .value_name("NAME=PATH")
                .action(ArgAction::Append)
                .help("Specify <subgraph>=<path/to/schema> for each subgraph"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The output supergraph config file to be generated"),
        )
        .arg(
            Arg::new("federation-version")
                .long("federation-version")
                .default_value(DEFAULT_FEDERATION_VERSION)
                .help("The version of apollo federation spec to use"),
        )
}

/// Synthesize the descriptor and write it to `--output`
///
/// # Errors
/// Malformed pairs, or the output file cannot be written.
pub fn run(args: &ArgMatches) -> anyhow::Result<u8> {
    let pairs: Vec<&String> = args.get_many::<String>("subgraph").unwrap_or_default().collect();
    let output = args
        .get_one::<PathBuf>("output")
        .context("--output must be specified")?;
    let version = args
        .get_one::<String>("federation-version")
        .map_or(DEFAULT_FEDERATION_VERSION, String::as_str);

    let descriptor = synthesize(pairs, version)?;
    descriptor
        .store(output)
        .with_context(|| format!("writing supergraph config {}", output.display()))?;

    tracing::info!(
        output = %output.display(),
        subgraphs = descriptor.subgraphs.len(),
        "supergraph config written"
    );
    Ok(EXIT_SUCCESS)
}
