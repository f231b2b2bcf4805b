use std::path::Path;

use anyhow::Result;

use super::super::{
    args::{CheckCommand, CheckGitCommand, CommonArgs},
    exit_status::ExitStatus,
    git::GitCheckout,
    report,
};
use super::scan_options;
use crate::core::{DeclarationSource, EnvCheckError, check_env_variables};

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let source = DeclarationSource::file(&cmd.env_file);
    run_check(&source, &cmd.project_dir, &cmd.common, None)
}

pub fn check_git(cmd: CheckGitCommand) -> Result<ExitStatus> {
    let checkout = GitCheckout::stage(&cmd.git)?;
    let env_file = checkout.find_file(&cmd.env_file)?;

    let source = DeclarationSource::file(env_file);
    let declared_in = format!("{} in {}", cmd.env_file.display(), cmd.git.repo_url);
    run_check(
        &source,
        checkout.project_dir(),
        &cmd.common,
        Some(&declared_in),
    )
}

/// `declared_in` replaces the source's own description in the report, so a
/// temporary checkout path never shows up in output.
fn run_check(
    source: &DeclarationSource,
    project_dir: &Path,
    common: &CommonArgs,
    declared_in: Option<&str>,
) -> Result<ExitStatus> {
    let options = scan_options(common, project_dir)?;

    match check_env_variables(source, project_dir, &options) {
        Ok(outcome) => {
            report::print_success(outcome.scan.variables.len(), outcome.scan.files_scanned);
            Ok(ExitStatus::Success)
        }
        Err(EnvCheckError::MissingDeclarations {
            missing,
            declared_in: described,
        }) => {
            report::print_missing(&missing, declared_in.unwrap_or(&described));
            Ok(ExitStatus::Failure)
        }
        Err(err) => Err(err.into()),
    }
}
