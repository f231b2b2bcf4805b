//! Declaration loading.
//!
//! Turns a declaration source into a flat `name -> value` mapping. Two file
//! formats are understood:
//!
//! - dotenv files (`.env`, or any `*.env`), `KEY=value` lines with `[\w.-]`
//!   keys; lines that are not assignments are skipped with a warning
//! - JSON documents (`*.json`), whose top-level keys are the declared names
//!
//! JSON files named like an ECS task definition (`taskdef.json`,
//! `prod-taskdef.json`, ...) are read from `containerDefinitions[0]` instead:
//! its `environment` and `secrets` lists provide the names, and secrets win
//! over plain entries with the same name.

use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::error::{EnvCheckError, Result};

const TASK_DEFINITION_SUFFIX: &str = "taskdef.json";

/// One `KEY=value` (or `KEY: value`) assignment. Quoted values may span lines.
static DOTENV_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^\s*(?:export\s+)?([\w.-]+)(?:\s*=\s*?|:\s+?)(\s*'(?:\\'|[^'])*'|\s*"(?:\\"|[^"])*"|\s*`(?:\\`|[^`])*`|[^#\r\n]+)?\s*(?:#.*)?$"#,
    )
    .unwrap()
});

/// Declared variables, keyed by exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredVariables {
    vars: BTreeMap<String, String>,
}

impl DeclaredVariables {
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }
}

impl From<BTreeMap<String, String>> for DeclaredVariables {
    fn from(vars: BTreeMap<String, String>) -> Self {
        Self { vars }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DeclaredVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Where declared variables come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationSource {
    /// A `.env` or `.json` file on disk.
    File(PathBuf),
    /// An in-memory mapping, used as-is.
    Mapping(BTreeMap<String, String>),
}

impl DeclarationSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Human-readable target for "add the missing variables to ..." messages.
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Mapping(_) => "the provided mapping".to_string(),
        }
    }

    pub fn load(&self) -> Result<DeclaredVariables> {
        match self {
            Self::File(path) => load_file(path),
            Self::Mapping(vars) => Ok(DeclaredVariables::from(vars.clone())),
        }
    }
}

impl fmt::Display for DeclarationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Dotenv,
    Json,
}

fn classify(path: &Path) -> Result<FileKind> {
    if path.as_os_str().is_empty() {
        return Err(EnvCheckError::invalid_source(
            "expected a path to a .env/.json file or a mapping",
        ));
    }

    // `.env` has no extension as far as `Path` is concerned.
    if path.file_name().and_then(|n| n.to_str()) == Some(".env") {
        return Ok(FileKind::Dotenv);
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some("env") => Ok(FileKind::Dotenv),
        Some("json") => Ok(FileKind::Json),
        other => Err(EnvCheckError::UnsupportedSource {
            path: path.to_path_buf(),
            extension: other
                .map(|ext| format!(".{}", ext))
                .unwrap_or_else(|| "(none)".to_string()),
        }),
    }
}

fn load_file(path: &Path) -> Result<DeclaredVariables> {
    let kind = classify(path)?;
    let content = fs::read_to_string(path).map_err(|e| EnvCheckError::filesystem(path, e))?;

    match kind {
        FileKind::Dotenv => Ok(parse_dotenv(&content)),
        FileKind::Json => parse_json(path, &content),
    }
}

/// Parse dotenv text. Values are taken literally: no `$VAR` expansion.
pub fn parse_dotenv(content: &str) -> DeclaredVariables {
    let content = content.replace("\r\n", "\n").replace('\r', "\n");
    let mut vars = BTreeMap::new();
    let mut parsed_to = 0;

    for caps in DOTENV_LINE_REGEX.captures_iter(&content) {
        let Some(assignment) = caps.get(0) else {
            continue;
        };
        warn_skipped_lines(&content[parsed_to..assignment.start()]);
        parsed_to = assignment.end();

        let value = caps.get(2).map_or("", |m| m.as_str());
        vars.insert(caps[1].to_string(), unquote(value));
    }
    warn_skipped_lines(&content[parsed_to..]);

    DeclaredVariables::from(vars)
}

fn unquote(raw: &str) -> String {
    let value = raw.trim();
    let Some(quote) = value.chars().next().filter(|c| matches!(c, '\'' | '"' | '`')) else {
        return value.to_string();
    };
    let inner = match value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
        Some(inner) => inner,
        None => return value.to_string(),
    };
    if quote == '"' {
        inner.replace("\\n", "\n").replace("\\r", "\r")
    } else {
        inner.to_string()
    }
}

fn warn_skipped_lines(gap: &str) {
    for line in gap.lines().map(str::trim) {
        if !line.is_empty() && !line.starts_with('#') {
            tracing::warn!(line, "skipping unparseable dotenv line");
        }
    }
}

fn parse_json(path: &Path, content: &str) -> Result<DeclaredVariables> {
    let document: Value = serde_json::from_str(content).map_err(|e| {
        EnvCheckError::invalid_source(format!("malformed JSON in {}: {}", path.display(), e))
    })?;

    if is_task_definition(path)
        && let Some(container) = first_container(&document)?
    {
        return Ok(container.into_declarations());
    }

    match document {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, value)| (key, value_to_string(value)))
            .collect()),
        _ => Err(EnvCheckError::invalid_source(format!(
            "{} must contain a JSON object at the top level",
            path.display()
        ))),
    }
}

fn is_task_definition(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(TASK_DEFINITION_SUFFIX))
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskDefinition {
    #[serde(default)]
    container_definitions: Vec<ContainerDefinition>,
}

#[derive(Debug, Deserialize)]
struct ContainerDefinition {
    #[serde(default)]
    environment: Vec<EnvironmentEntry>,
    #[serde(default)]
    secrets: Vec<SecretEntry>,
}

#[derive(Debug, Deserialize)]
struct EnvironmentEntry {
    name: String,
    #[serde(default)]
    value: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecretEntry {
    name: String,
    #[serde(default)]
    value_from: Option<String>,
}

impl ContainerDefinition {
    fn into_declarations(self) -> DeclaredVariables {
        let mut vars = BTreeMap::new();
        for entry in self.environment {
            vars.insert(entry.name, entry.value.map(value_to_string).unwrap_or_default());
        }
        // Secrets override plain environment entries.
        for secret in self.secrets {
            vars.insert(secret.name, secret.value_from.unwrap_or_default());
        }
        DeclaredVariables::from(vars)
    }
}

fn first_container(document: &Value) -> Result<Option<ContainerDefinition>> {
    if !matches!(document.get("containerDefinitions"), Some(Value::Array(_))) {
        return Ok(None);
    }
    let taskdef: TaskDefinition = serde_json::from_value(document.clone()).map_err(|e| {
        EnvCheckError::invalid_source(format!("malformed task definition: {}", e))
    })?;
    Ok(taskdef.container_definitions.into_iter().next())
}
