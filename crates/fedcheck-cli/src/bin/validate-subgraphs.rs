use fedcheck_cli::commands::validate;
use std::process::ExitCode;

fn main() -> ExitCode {
    fedcheck_cli::run_binary(validate::command(), validate::run)
}
