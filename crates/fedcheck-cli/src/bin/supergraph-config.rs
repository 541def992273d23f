use fedcheck_cli::commands::supergraph;
use std::process::ExitCode;

fn main() -> ExitCode {
    fedcheck_cli::run_binary(supergraph::command(), supergraph::run)
}
