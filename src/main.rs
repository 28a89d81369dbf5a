//! listfile - Edit a list stored one element per line

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = listfile::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
