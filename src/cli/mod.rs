//! Command-line layer: argument parsing, logging, git staging and reporting.

pub mod args;
mod commands;
mod exit_status;
mod git;
mod logging;
pub mod report;

use anyhow::Result;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;
pub use logging::init_logging;

use commands::{
    check::{check, check_git},
    init::init,
    scan::{scan, scan_git},
};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(Arguments { command }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::CheckGit(cmd)) => check_git(cmd),
        Some(Command::ScanGit(cmd)) => scan_git(cmd),
        Some(Command::Init(cmd)) => init(cmd),
        None => Ok(ExitStatus::Success),
    }
}
