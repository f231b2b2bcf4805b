use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::CustomPattern;

pub const CONFIG_FILE_NAME: &str = ".envcheckrc.json";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extra or replacement extraction patterns, keyed by their `tag`.
    #[serde(default)]
    pub patterns: Vec<CustomPattern>,
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any pattern fails to compile or has no capture group.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.patterns {
            pattern
                .compile()
                .with_context(|| format!("Invalid entry in 'patterns': \"{}\"", pattern.tag))?;
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config came from; `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Load an explicit config file, or discover one upward from `start_dir`.
pub fn load_config(explicit: Option<&Path>, start_dir: &Path) -> Result<ConfigLoadResult> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(start_dir),
    };

    match path {
        Some(path) => Ok(ConfigLoadResult {
            config: load_config_file(&path)?,
            path: Some(path),
        }),
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
