//! Extraction patterns, grouped by language tag.
//!
//! A [`PatternRegistry`] is immutable once built. Caller-supplied entries are
//! applied with [`PatternRegistry::merged_with`], which returns a new registry:
//! a custom entry with an existing tag replaces that entry (pattern and
//! extensions both) in place, any other custom entry is appended.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::error::{EnvCheckError, Result};

/// Built-in tags: `process.env.NAME` / `process.env["NAME"]`,
/// `GetEnvironmentVariable("NAME")` and `String.fromEnvironment("NAME")`.
const DEFAULT_PATTERNS: &[(&str, &str, &[&str])] = &[
    (
        "javascript",
        r#"process\.env(?:\["([\w-]+)"\]|\.(\w+))"#,
        &[".js", ".jsx", ".ts", ".tsx"],
    ),
    ("dotnet", r#"GetEnvironmentVariable\("([\w-]+)"\)"#, &[".cs"]),
    ("flutter", r#"String\.fromEnvironment\("([\w-]+)"\)"#, &[".dart"]),
];

/// Caller-supplied pattern, as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomPattern {
    pub tag: String,
    pub pattern: String,
    pub extensions: Vec<String>,
}

impl CustomPattern {
    pub fn new(
        tag: impl Into<String>,
        pattern: impl Into<String>,
        extensions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            tag: tag.into(),
            pattern: pattern.into(),
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn compile(&self) -> Result<PatternEntry> {
        PatternEntry::new(&self.tag, &self.pattern, self.extensions.clone())
    }
}

/// One language tag: its extraction pattern and the extensions it claims.
#[derive(Debug, Clone)]
pub struct PatternEntry {
    tag: String,
    pattern: Regex,
    extensions: Vec<String>,
}

impl PatternEntry {
    pub fn new(tag: &str, pattern: &str, extensions: Vec<String>) -> Result<Self> {
        let invalid = |reason: String| EnvCheckError::InvalidPattern {
            tag: tag.to_string(),
            reason,
        };

        let pattern = Regex::new(pattern).map_err(|e| invalid(e.to_string()))?;
        if pattern.captures_len() < 2 {
            return Err(invalid(
                "pattern must contain a capture group for the variable name".to_string(),
            ));
        }
        if let Some(ext) = extensions.iter().find(|ext| !ext.starts_with('.')) {
            return Err(invalid(format!(
                "extension \"{}\" must start with a dot",
                ext
            )));
        }

        Ok(Self {
            tag: tag.to_string(),
            pattern,
            extensions,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn claims(&self, extension: &str) -> bool {
        self.extensions.iter().any(|ext| ext == extension)
    }

    /// All variable names referenced in `content`, in match order.
    pub fn extract<'a>(&'a self, content: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pattern
            .captures_iter(content)
            .filter_map(|caps| first_group(&caps))
    }
}

/// The first participating, non-empty group is the variable name.
fn first_group<'h>(caps: &Captures<'h>) -> Option<&'h str> {
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .find(|name| !name.is_empty())
}

#[derive(Debug, Clone)]
pub struct PatternRegistry {
    entries: Vec<PatternEntry>,
}

impl Default for PatternRegistry {
    fn default() -> Self {
        let entries = DEFAULT_PATTERNS
            .iter()
            .filter_map(|(tag, pattern, exts)| {
                let extensions = exts.iter().map(|e| e.to_string()).collect();
                PatternEntry::new(tag, pattern, extensions).ok()
            })
            .collect();
        Self { entries }
    }
}

impl PatternRegistry {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Default registry with `custom` applied on top.
    pub fn with_custom(custom: &[CustomPattern]) -> Result<Self> {
        let overrides = custom
            .iter()
            .map(CustomPattern::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::default().merged_with(overrides))
    }

    pub fn merged_with(&self, overrides: impl IntoIterator<Item = PatternEntry>) -> Self {
        let mut entries = self.entries.clone();
        for entry in overrides {
            match entries.iter_mut().find(|e| e.tag == entry.tag) {
                Some(existing) => *existing = entry,
                None => entries.push(entry),
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn get(&self, tag: &str) -> Option<&PatternEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    /// First entry claiming `extension` (leading dot included, case-sensitive).
    pub fn entry_for_extension(&self, extension: &str) -> Option<&PatternEntry> {
        self.entries.iter().find(|e| e.claims(extension))
    }
}
