//! envcheck - environment variable declaration checker
//!
//! envcheck scans a source tree for environment variable references
//! (`process.env.NAME`, `GetEnvironmentVariable("NAME")`,
//! `String.fromEnvironment("NAME")`, or any caller-supplied pattern) and
//! reports every name that is not declared in a `.env` file, a JSON document
//! (including ECS task definitions) or an in-memory mapping.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, git staging, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Declaration loading, pattern registry, scanner and reconciliation

pub mod cli;
pub mod config;
pub mod core;

pub use crate::core::{
    CheckOutcome, DeclarationSource, DeclaredVariables, EnvCheckError, ScanOptions,
    check_env_variables, get_environments,
};
