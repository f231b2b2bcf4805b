//! Core engine: load declarations, scan a project tree, reconcile.
//!
//! Nothing in this module writes to the terminal. Diagnostics go through
//! `tracing` when [`ScanOptions::debug`] is set; results are returned to the
//! caller, which decides how to report them.

pub mod declarations;
pub mod error;
pub mod patterns;
pub mod reconcile;
pub mod scanner;

use std::path::Path;

use tracing::debug;

pub use declarations::{DeclarationSource, DeclaredVariables};
pub use error::{EnvCheckError, Result};
pub use patterns::{CustomPattern, PatternEntry, PatternRegistry};
pub use reconcile::find_missing;
pub use scanner::{FoundVariables, ScanResult, scan_directory};

/// Options shared by [`check_env_variables`] and [`get_environments`].
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Emit a debug event for every matching file and discovered name.
    pub debug: bool,
    /// Entries merged over the default registry, replacing defaults by tag.
    pub custom_patterns: Vec<CustomPattern>,
}

impl ScanOptions {
    pub fn registry(&self) -> Result<PatternRegistry> {
        PatternRegistry::with_custom(&self.custom_patterns)
    }
}

/// Successful outcome of [`check_env_variables`].
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub declared: DeclaredVariables,
    pub scan: ScanResult,
}

/// Load declarations from `source`, scan `project_dir` and make sure every
/// referenced variable is declared.
///
/// Declarations are loaded before anything is scanned, so an unusable source
/// fails fast. Returns [`EnvCheckError::MissingDeclarations`] listing the
/// undeclared names in scan order.
pub fn check_env_variables(
    source: &DeclarationSource,
    project_dir: &Path,
    options: &ScanOptions,
) -> Result<CheckOutcome> {
    if options.debug {
        debug!(source = %source, project = %project_dir.display(), "checking environment variables");
    }

    let registry = options.registry()?;
    let declared = source.load()?;
    if options.debug {
        debug!(count = declared.len(), "loaded declarations");
    }

    let scan = scan_directory(project_dir, &registry, options.debug)?;
    let missing = find_missing(&declared, &scan.variables);
    if !missing.is_empty() {
        return Err(EnvCheckError::MissingDeclarations {
            missing,
            declared_in: source.describe(),
        });
    }

    Ok(CheckOutcome { declared, scan })
}

/// Scan `project_dir` and return every referenced variable, in scan order.
pub fn get_environments(project_dir: &Path, options: &ScanOptions) -> Result<Vec<String>> {
    if options.debug {
        debug!(project = %project_dir.display(), "scanning project directory");
    }

    let registry = options.registry()?;
    let scan = scan_directory(project_dir, &registry, options.debug)?;
    Ok(scan.variables.into_vec())
}
