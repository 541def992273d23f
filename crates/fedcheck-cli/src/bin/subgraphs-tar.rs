use fedcheck_cli::commands::archive;
use std::process::ExitCode;

fn main() -> ExitCode {
    fedcheck_cli::run_binary(archive::command(), archive::run)
}
