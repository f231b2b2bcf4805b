//! Staging a remote project in a temporary checkout.

use std::{
    path::{Component, Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use tempfile::TempDir;
use tracing::debug;

use super::args::GitArgs;

/// A shallow clone living in a temporary directory.
///
/// The directory is removed when the checkout is dropped, whichever way the
/// command using it exits.
pub struct GitCheckout {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl GitCheckout {
    pub fn stage(args: &GitArgs) -> Result<Self> {
        if let Some(path) = &args.path {
            validate_subpath(path)?;
        }

        let temp_dir = tempfile::Builder::new()
            .prefix("envcheck-")
            .tempdir()
            .context("Failed to create temporary directory")?;

        match &args.branch {
            Some(branch) => eprintln!(
                "{} {} (branch {})",
                "Cloning".bold().green(),
                args.repo_url,
                branch
            ),
            None => eprintln!("{} {}", "Cloning".bold().green(), args.repo_url),
        }
        git_clone(&args.repo_url, args.branch.as_deref(), temp_dir.path())?;

        let project_dir = match &args.path {
            Some(path) => temp_dir.path().join(path),
            None => temp_dir.path().to_path_buf(),
        };
        if !project_dir.is_dir() {
            bail!(
                "Path {} does not exist in {}",
                args.path
                    .as_deref()
                    .unwrap_or(Path::new("."))
                    .display(),
                args.repo_url
            );
        }

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Resolve a file inside the project directory, failing if it is absent.
    pub fn find_file(&self, name: &Path) -> Result<PathBuf> {
        let path = self.project_dir.join(name);
        if !path.is_file() {
            bail!("No env source file found: {}", name.display());
        }
        Ok(path)
    }
}

fn git_clone(url: &str, branch: Option<&str>, target: &Path) -> Result<()> {
    let mut cmd = Command::new("git");
    cmd.args(["clone", "--quiet", "--depth", "1"]);
    if let Some(branch) = branch {
        cmd.args(["--branch", branch]);
    }
    cmd.arg("--").arg(url).arg(target);
    // Keep stdout free for command output; git errors still reach stderr.
    cmd.stdin(Stdio::null()).stdout(Stdio::null());

    debug!(?cmd, "running git");
    let status = cmd
        .status()
        .context("Failed to run git. Is it installed and on PATH?")?;
    if !status.success() {
        bail!("git clone of {} failed ({})", url, status);
    }
    Ok(())
}

fn validate_subpath(path: &Path) -> Result<()> {
    let escapes = path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes {
        bail!(
            "--path must be relative to the repository root: {}",
            path.display()
        );
    }
    Ok(())
}
