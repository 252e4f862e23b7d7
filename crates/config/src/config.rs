use serde::{Deserialize, Serialize};

/// Top-level support assistant configuration.
///
/// ```yaml
/// ruleSets:
///   - name: sap.m
///     niceName: Mobile controls
///     rules:
///       - id: selectUsage
///         title: Select usage
///         description: Checks how the select control is bound
///         resolution: Bind the items aggregation
///         audiences: [Control]
///         categories: [Bindings]
///         minVersion: "1.28"
/// selectedRules: [selectUsage]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SupportConfig {
    #[serde(default)]
    pub rule_sets: Vec<RuleSetConfig>,

    /// Ids of the rules to pre-select in the rules view
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_rules: Vec<String>,
}

impl SupportConfig {
    /// Get a rule set by name.
    #[must_use]
    pub fn rule_set(&self, name: &str) -> Option<&RuleSetConfig> {
        self.rule_sets.iter().find(|rule_set| rule_set.name == name)
    }

    /// Total number of rule definitions across all rule sets
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rule_sets.iter().map(|rule_set| rule_set.rules.len()).sum()
    }
}

/// A named collection of rule definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleSetConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nice_name: Option<String>,

    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

/// Static metadata of a single rule.
///
/// Audiences and categories are kept as labels here; they are checked
/// against the known sets when the rule is added to a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub resolution: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resolution_urls: Vec<ResolutionUrlConfig>,

    pub audiences: Vec<String>,
    pub categories: Vec<String>,

    /// Minimum framework version the rule applies to, or `"-"` for any
    #[serde(default = "default_min_version")]
    pub min_version: String,

    #[serde(default, rename = "async")]
    pub is_async: bool,
}

fn default_min_version() -> String {
    "-".to_string()
}

/// A link to documentation explaining how to resolve an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolutionUrlConfig {
    pub text: String,
    pub href: String,
}
