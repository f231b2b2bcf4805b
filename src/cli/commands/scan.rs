use anyhow::Result;

use super::super::{
    args::{ScanCommand, ScanGitCommand},
    exit_status::ExitStatus,
    git::GitCheckout,
    report,
};
use super::scan_options;
use crate::core::get_environments;

pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let options = scan_options(&cmd.common, &cmd.project_dir)?;
    let names = get_environments(&cmd.project_dir, &options)?;
    report::print_variables(&names, cmd.json)?;
    Ok(ExitStatus::Success)
}

pub fn scan_git(cmd: ScanGitCommand) -> Result<ExitStatus> {
    let checkout = GitCheckout::stage(&cmd.git)?;
    let options = scan_options(&cmd.common, checkout.project_dir())?;
    let names = get_environments(checkout.project_dir(), &options)?;
    report::print_variables(&names, cmd.json)?;
    Ok(ExitStatus::Success)
}
