//! Locating and decoding `.supportrc` files.
//!
//! A document is decoded into a generic tree first and turned into a
//! [`SupportConfig`] one rule set at a time, so that a malformed entry is
//! reported together with the rule set and rule it belongs to.

use crate::{ConfigError, Result, RuleDefinition, RuleSetConfig, SupportConfig};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// The one file name whose format is not given by its extension
const BARE_CONFIG: &str = ".supportrc";

/// Looked up in every directory, in order of preference
const CONFIG_FILES: &[&str] = &[
    ".supportrc.yml",
    ".supportrc.yaml",
    ".supportrc.json",
    BARE_CONFIG,
];

#[derive(Debug, Clone, Copy)]
enum Format {
    Yaml,
    Json,
}

const YAML_ONLY: &[Format] = &[Format::Yaml];
const JSON_ONLY: &[Format] = &[Format::Json];
const YAML_THEN_JSON: &[Format] = &[Format::Yaml, Format::Json];

impl Format {
    /// Formats to try for `path`, in order.
    fn candidates(path: &Path) -> Option<&'static [Self]> {
        match path.extension().and_then(OsStr::to_str) {
            Some("yml" | "yaml") => Some(YAML_ONLY),
            Some("json") => Some(JSON_ONLY),
            None if path.file_name() == Some(OsStr::new(BARE_CONFIG)) => Some(YAML_THEN_JSON),
            _ => None,
        }
    }

    fn decode(self, contents: &str) -> std::result::Result<Value, String> {
        match self {
            Self::Yaml => {
                serde_yaml::from_str(contents).map_err(|e| format!("YAML parse error: {e}"))
            }
            Self::Json => {
                serde_json::from_str(contents).map_err(|e| format!("JSON parse error: {e}"))
            }
        }
    }
}

/// Find the nearest config file, starting at `start_dir` and walking up to
/// the filesystem root. A directory's own files shadow those of its parents.
#[tracing::instrument(skip(start_dir), fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let found = start_dir
        .ancestors()
        .flat_map(|dir| CONFIG_FILES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file());

    match &found {
        Some(path) => tracing::info!(path = %path.display(), "Found config file"),
        None => tracing::debug!("No config file found"),
    }
    found
}

/// Read and decode the config file at `path`.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<SupportConfig> {
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        rule_sets = config.rule_sets.len(),
        rules = config.rule_count(),
        "Config loaded"
    );
    Ok(config)
}

/// Decode config `contents`. `path` picks the format and is named in errors.
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<SupportConfig> {
    let formats = Format::candidates(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let document = decode(contents, formats).map_err(|message| invalid(path, message))?;
    let config = build_config(document, path)?;
    validate_config(&config, path)?;
    Ok(config)
}

fn decode(contents: &str, formats: &[Format]) -> std::result::Result<Value, String> {
    let mut errors = Vec::new();
    for format in formats {
        match format.decode(contents) {
            Ok(document) => return Ok(document),
            Err(message) => {
                tracing::trace!(?format, %message, "Decoding failed");
                errors.push(message);
            }
        }
    }
    Err(errors.join("; "))
}

fn build_config(document: Value, path: &Path) -> Result<SupportConfig> {
    let mut root = match document {
        Value::Null => return Ok(SupportConfig::default()),
        Value::Object(root) => root,
        _ => return Err(invalid(path, "expected a mapping at the top level")),
    };
    let rule_sets = match root.remove("ruleSets") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(rule_sets)) => rule_sets,
        Some(_) => return Err(invalid(path, "ruleSets must be a list")),
    };

    let mut config: SupportConfig =
        serde_json::from_value(Value::Object(root)).map_err(|e| invalid(path, e.to_string()))?;
    for (index, rule_set) in rule_sets.into_iter().enumerate() {
        config.rule_sets.push(build_rule_set(index, rule_set, path)?);
    }
    Ok(config)
}

fn build_rule_set(index: usize, document: Value, path: &Path) -> Result<RuleSetConfig> {
    let rule_set = label(&document, "name", index);

    if let Some(rules) = document.get("rules").and_then(Value::as_array) {
        for (index, rule) in rules.iter().enumerate() {
            if let Err(e) = RuleDefinition::deserialize(rule) {
                return Err(ConfigError::InvalidRule {
                    path: path.to_path_buf(),
                    rule_set,
                    rule: label(rule, "id", index),
                    message: e.to_string(),
                });
            }
        }
    }

    serde_json::from_value(document).map_err(|e| ConfigError::InvalidRuleSet {
        path: path.to_path_buf(),
        rule_set,
        message: e.to_string(),
    })
}

/// The `name` or `id` of an entry, or its 1-based position if it has none.
fn label(entry: &Value, key: &str, index: usize) -> String {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map_or_else(|| format!("#{}", index + 1), str::to_string)
}

fn invalid(path: &Path, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Rule set names must be non-empty and unique. Rule-level checks happen
/// when the rules are added to their rule set.
fn validate_config(config: &SupportConfig, path: &Path) -> Result<()> {
    let mut seen = HashSet::new();

    for rule_set in &config.rule_sets {
        if rule_set.name.trim().is_empty() {
            return Err(invalid(path, "Rule set has an empty name"));
        }
        if !seen.insert(rule_set.name.as_str()) {
            return Err(invalid(
                path,
                format!("Duplicate rule set '{}'", rule_set.name),
            ));
        }
    }

    Ok(())
}
