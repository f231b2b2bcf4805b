use std::{
    collections::HashSet,
    fs,
    io,
    path::{Path, PathBuf},
};

use tracing::debug;
use walkdir::WalkDir;

use super::{
    error::{EnvCheckError, Result},
    patterns::PatternRegistry,
};

/// Variable names found during a scan, deduplicated, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundVariables {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl FoundVariables {
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl<S: AsRef<str>> FromIterator<S> for FoundVariables {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut found = Self::default();
        for name in iter {
            found.insert(name.as_ref());
        }
        found
    }
}

/// Result of scanning a project tree.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub variables: FoundVariables,
    /// Number of files whose extension matched a registered tag.
    pub files_scanned: usize,
}

/// Walk `root` depth-first and collect every variable name referenced by a
/// file whose extension is claimed by `registry`.
///
/// Entries are visited in file-name order so repeated scans of the same tree
/// report names in the same order. Nothing is ignored: dependency and build
/// directories are scanned like any other. Any unreadable entry aborts the
/// scan.
pub fn scan_directory(root: &Path, registry: &PatternRegistry, debug: bool) -> Result<ScanResult> {
    let mut result = ScanResult::default();

    let walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(walk_error)?;
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        let Some(extension) = dotted_extension(path) else {
            continue;
        };
        let Some(pattern) = registry.entry_for_extension(&extension) else {
            continue;
        };

        if debug {
            debug!(file = %path.display(), tag = pattern.tag(), "scanning file");
        }

        let content = read_text(path)?;
        result.files_scanned += 1;
        for name in pattern.extract(&content) {
            if debug {
                debug!(name, file = %path.display(), "found variable");
            }
            result.variables.insert(name);
        }
    }

    Ok(result)
}

/// Extension with its leading dot (`.tsx`), or `None` for files like `.env`
/// or `Makefile`.
fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| EnvCheckError::filesystem(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn walk_error(err: walkdir::Error) -> EnvCheckError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(PathBuf::new);
    let source = match err.into_io_error() {
        Some(io_err) => io_err,
        None => io::Error::other("symlink loop detected"),
    };
    EnvCheckError::filesystem(path, source)
}
