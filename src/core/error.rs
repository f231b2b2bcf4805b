use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors produced by the scan/reconcile engine.
///
/// The CLI wraps these in `anyhow` and maps them to exit statuses; library
/// callers can match on the variant directly.
#[derive(Debug, Error)]
pub enum EnvCheckError {
    /// The declaration file has an extension we cannot parse.
    #[error("unsupported declaration source {}: extension {extension}", .path.display())]
    UnsupportedSource { path: PathBuf, extension: String },

    /// The declaration input could not be interpreted as a variable mapping.
    #[error("invalid declaration source: {reason}")]
    InvalidSource { reason: String },

    /// A file or directory could not be read.
    #[error("cannot read {}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A caller-supplied extraction pattern is unusable.
    #[error("invalid pattern for tag \"{tag}\": {reason}")]
    InvalidPattern { tag: String, reason: String },

    /// Reconciliation found referenced variables that were never declared.
    #[error("{} environment variable(s) not declared in {declared_in}", .missing.len())]
    MissingDeclarations {
        missing: Vec<String>,
        declared_in: String,
    },
}

impl EnvCheckError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_source(reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EnvCheckError>;
