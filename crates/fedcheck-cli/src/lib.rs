//! Command line front ends
//!
//! Three binaries, one per build step:
//!
//! ```text
//! supergraph-config   --subgraph N=P... --output F [--federation-version V]
//! subgraphs-tar       --subgraph N=P... --config F --output F [--schemas-dir D] [--flatten-schemas]
//! validate-subgraphs  --base-subgraphs-tar F --current-subgraphs-tar F --subgraphs A,B --tenant T [--rover P]
//! ```
//!
//! Each binary is a thin `main` over [`run_binary`], so the commands can be
//! driven in-process from tests.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod args;
pub mod commands;
pub mod logging;

use clap::{ArgMatches, Command};
use fedcheck_descriptor::DescriptorError;
use fedcheck_validate::ValidateError;
use std::ffi::OsString;
use std::process::ExitCode;

/// Exit status of a clean run
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status for fatal errors and failed validations
pub const EXIT_FAILURE: u8 = 1;

/// Exit status for unparsable command lines
pub const USAGE_EXIT_CODE: u8 = 2;

/// Entry point signature shared by every command, returning the exit status
pub type RunFn = fn(&ArgMatches) -> anyhow::Result<u8>;

/// Parse `args` against `command` and run it
///
/// Legacy single-dash flags are accepted. A fatal error prints one
/// `Error: ...` line with its causes on stderr and exits 1, followed by the
/// usage line when the error is about the arguments; a command line clap
/// cannot parse exits with [`USAGE_EXIT_CODE`].
pub fn run_with_args<I, T>(mut command: Command, run: RunFn, args: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let usage = command.render_usage();
    let args = args::normalize_args(&command, args);
    let matches = match command.try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                USAGE_EXIT_CODE
            } else {
                EXIT_SUCCESS
            };
        }
    };

    match run(&matches) {
        Ok(status) => status,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("Error: {err:#}");
            if is_argument_error(&err) {
                eprintln!("{usage}");
            }
            EXIT_FAILURE
        }
    }
}

/// Whether a command failed because of what the caller passed
pub fn is_argument_error(err: &anyhow::Error) -> bool {
    if let Some(err) = err.downcast_ref::<ValidateError>() {
        return err.is_argument_error();
    }
    err.downcast_ref::<DescriptorError>()
        .is_some_and(DescriptorError::is_argument_error)
}

/// Install logging and run `command` against the process arguments
pub fn run_binary(command: Command, run: RunFn) -> ExitCode {
    logging::init_logging();
    ExitCode::from(run_with_args(command, run, std::env::args_os()))
}
