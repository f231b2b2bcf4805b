pub mod check;
pub mod init;
pub mod scan;

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use super::args::CommonArgs;
use crate::config::load_config;
use crate::core::ScanOptions;

/// Build scan options from the command line and the project's config file.
fn scan_options(common: &CommonArgs, project_dir: &Path) -> Result<ScanOptions> {
    let loaded = load_config(common.config.as_deref(), project_dir)?;
    if let Some(path) = &loaded.path {
        debug!(config = %path.display(), patterns = loaded.config.patterns.len(), "loaded config");
    }

    Ok(ScanOptions {
        debug: common.debug,
        custom_patterns: loaded.config.patterns,
    })
}
