//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Verify every referenced environment variable is declared
//! - `scan`: List environment variables referenced by a project
//! - `check-git`: Clone a repository, then run `check` on it
//! - `scan-git`: Clone a repository, then run `scan` on it
//! - `init`: Initialize envcheck configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, builder::FalseyValueParser};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the debug flag from the command's common args.
    pub fn debug(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.debug,
            Some(Command::Scan(cmd)) => cmd.common.debug,
            Some(Command::CheckGit(cmd)) => cmd.common.debug,
            Some(Command::ScanGit(cmd)) => cmd.common.debug,
            Some(Command::Init(_)) | None => false,
        }
    }
}

/// Common arguments shared by all scanning commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Print every scanned file and discovered variable
    #[arg(long, env = "ENVCHECK_DEBUG", value_parser = FalseyValueParser::new())]
    pub debug: bool,

    /// Config file (default: nearest .envcheckrc.json)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Where to clone a project from.
#[derive(Debug, Clone, Args)]
pub struct GitArgs {
    /// Repository URL (anything `git clone` accepts)
    pub repo_url: String,

    /// Branch or tag to clone (default: the remote's default branch)
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Project directory inside the repository
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Declaration file (.env or .json)
    pub env_file: PathBuf,

    /// Project directory to scan
    #[arg(default_value = ".")]
    pub project_dir: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Project directory to scan
    #[arg(default_value = ".")]
    pub project_dir: PathBuf,

    /// Print the variables as a JSON array
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckGitCommand {
    #[command(flatten)]
    pub git: GitArgs,

    /// Declaration file, relative to the project directory
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ScanGitCommand {
    #[command(flatten)]
    pub git: GitArgs,

    /// Print the variables as a JSON array
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to create the config file in
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that every referenced environment variable is declared
    Check(CheckCommand),
    /// List environment variables referenced by a project
    Scan(ScanCommand),
    /// Clone a git repository and check its environment variables
    CheckGit(CheckGitCommand),
    /// Clone a git repository and list its environment variables
    ScanGit(ScanGitCommand),
    /// Initialize a new .envcheckrc.json configuration file
    Init(InitCommand),
}
