//! CLI command implementations

use colored::Colorize;
use std::process::ExitCode;

pub mod check;
pub mod rules;

/// Exit code for runs that could not start: bad configuration, unknown
/// rule ids, missing paths.
pub const SETUP_ERROR_EXIT: u8 = 2;

/// Maps a command's result to the process exit code, printing the error.
pub fn exit_code(result: anyhow::Result<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red(), e);
            ExitCode::from(SETUP_ERROR_EXIT)
        }
    }
}
