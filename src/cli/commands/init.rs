use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{args::InitCommand, exit_status::ExitStatus, report::SUCCESS_MARK};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write a default `.envcheckrc.json` into the target directory.
pub fn init(cmd: InitCommand) -> Result<ExitStatus> {
    let config_path = cmd.dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", config_path.display());
        return Ok(ExitStatus::Failure);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", config_path.display()).green()
    );

    Ok(ExitStatus::Success)
}
