use crate::rule::{ResolutionUrl, Rule};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};
use support_config::{RuleDefinition, RuleSetConfig, SupportConfig};
use support_types::{Audience, Category, UnknownVariant};
use thiserror::Error;

/// `-` (any version) or a dotted version such as `1.28` or `1.71.2`
static MIN_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-|\d+\.\d+(\.\d+)?)$").expect("min version regex must compile"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSetError {
    #[error("Support rule needs an id")]
    MissingId,

    #[error("Support rule id '{0}' must not contain whitespace")]
    InvalidId(String),

    #[error("Support rule with the id '{id}' already exists in rule set '{rule_set}'")]
    DuplicateRule { id: String, rule_set: String },

    #[error("Support rule with the id '{0}' does not exist")]
    UnknownRule(String),

    #[error("Support rule with the id '{id}' should have a {field}")]
    MissingField { id: String, field: &'static str },

    #[error("Support rule with the id '{0}' should have a resolution or resolution urls")]
    MissingResolution(String),

    #[error("Support rule with the id '{id}' has an invalid min version '{version}'")]
    InvalidMinVersion { id: String, version: String },

    #[error("Support rule with the id '{id}' uses an {source}")]
    UnknownLabel {
        id: String,
        #[source]
        source: UnknownVariant,
    },
}

/// A named collection of rules, keyed by rule id.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    name: String,
    nice_name: Option<String>,
    rules: BTreeMap<String, Arc<Rule>>,
}

impl RuleSet {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nice_name: None,
            rules: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_nice_name(mut self, nice_name: impl Into<String>) -> Self {
        self.nice_name = Some(nice_name.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn nice_name(&self) -> Option<&str> {
        self.nice_name.as_deref()
    }

    #[must_use]
    pub const fn rules(&self) -> &BTreeMap<String, Arc<Rule>> {
        &self.rules
    }

    #[must_use]
    pub fn rule(&self, id: &str) -> Option<&Arc<Rule>> {
        self.rules.get(id)
    }

    /// Validate `rule`, attribute it to this rule set and add it.
    ///
    /// Returns the shared handle that issue facades bind to.
    #[tracing::instrument(skip(self, rule), fields(rule_set = %self.name, rule = %rule.id))]
    pub fn add_rule(&mut self, mut rule: Rule) -> Result<Arc<Rule>, RuleSetError> {
        verify_rule(&rule)?;
        if self.rules.contains_key(&rule.id) {
            return Err(RuleSetError::DuplicateRule {
                id: rule.id,
                rule_set: self.name.clone(),
            });
        }

        rule.set_lib_name(&self.name);
        let rule = Arc::new(rule);
        self.rules.insert(rule.id.clone(), Arc::clone(&rule));
        tracing::debug!(rules = self.rules.len(), "Rule added");
        Ok(rule)
    }

    /// Replace the rule registered as `id`. The replacement may carry a new
    /// id, as long as it does not collide with another rule.
    pub fn update_rule(&mut self, id: &str, mut rule: Rule) -> Result<Arc<Rule>, RuleSetError> {
        if !self.rules.contains_key(id) {
            return Err(RuleSetError::UnknownRule(id.to_string()));
        }
        verify_rule(&rule)?;
        if rule.id != id && self.rules.contains_key(&rule.id) {
            return Err(RuleSetError::DuplicateRule {
                id: rule.id,
                rule_set: self.name.clone(),
            });
        }

        self.rules.remove(id);
        rule.set_lib_name(&self.name);
        let rule = Arc::new(rule);
        self.rules.insert(rule.id.clone(), Arc::clone(&rule));
        tracing::debug!(rule_set = %self.name, old = id, new = %rule.id, "Rule updated");
        Ok(rule)
    }

    pub fn remove_rule(&mut self, id: &str) -> Option<Arc<Rule>> {
        self.rules.remove(id)
    }

    /// Build a rule set from its configuration, validating every rule.
    pub fn from_config(config: &RuleSetConfig) -> Result<Self, RuleSetError> {
        let mut rule_set = Self::new(&config.name);
        rule_set.nice_name.clone_from(&config.nice_name);
        for definition in &config.rules {
            rule_set.add_rule(rule_from_definition(definition)?)?;
        }
        Ok(rule_set)
    }

    /// Build every rule set of a loaded configuration, keyed by name.
    pub fn all_from_config(config: &SupportConfig) -> Result<BTreeMap<String, Self>, RuleSetError> {
        let mut rule_sets = BTreeMap::new();
        for rule_set in &config.rule_sets {
            rule_sets.insert(rule_set.name.clone(), Self::from_config(rule_set)?);
        }
        Ok(rule_sets)
    }
}

fn verify_rule(rule: &Rule) -> Result<(), RuleSetError> {
    if rule.id.is_empty() {
        return Err(RuleSetError::MissingId);
    }
    if rule.id.chars().any(char::is_whitespace) {
        return Err(RuleSetError::InvalidId(rule.id.clone()));
    }

    let missing = |field| RuleSetError::MissingField {
        id: rule.id.clone(),
        field,
    };
    if rule.title.trim().is_empty() {
        return Err(missing("title"));
    }
    if rule.description.trim().is_empty() {
        return Err(missing("description"));
    }
    if rule.resolution.trim().is_empty() && rule.resolution_urls.is_empty() {
        return Err(RuleSetError::MissingResolution(rule.id.clone()));
    }
    if rule.audiences.is_empty() {
        return Err(missing("audience"));
    }
    if rule.categories.is_empty() {
        return Err(missing("category"));
    }
    if !MIN_VERSION.is_match(&rule.min_version) {
        return Err(RuleSetError::InvalidMinVersion {
            id: rule.id.clone(),
            version: rule.min_version.clone(),
        });
    }

    Ok(())
}

fn rule_from_definition(definition: &RuleDefinition) -> Result<Rule, RuleSetError> {
    let unknown = |source| RuleSetError::UnknownLabel {
        id: definition.id.clone(),
        source,
    };

    let audiences = definition
        .audiences
        .iter()
        .map(|label| label.parse())
        .collect::<Result<Vec<Audience>, _>>()
        .map_err(unknown)?;
    let categories = definition
        .categories
        .iter()
        .map(|label| label.parse())
        .collect::<Result<Vec<Category>, _>>()
        .map_err(unknown)?;

    let mut rule = Rule::new(
        &definition.id,
        &definition.title,
        &definition.description,
        &definition.resolution,
    )
    .with_audiences(audiences)
    .with_categories(categories)
    .with_min_version(&definition.min_version);
    rule.resolution_urls = definition
        .resolution_urls
        .iter()
        .map(|url| ResolutionUrl::new(&url.text, &url.href))
        .collect();
    rule.is_async = definition.is_async;

    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use support_config::ResolutionUrlConfig;

    fn valid_rule(id: &str) -> Rule {
        Rule::new(id, "title", "description", "resolution")
            .with_audiences([Audience::Control])
            .with_categories([Category::Performance])
            .with_min_version("1.28")
    }

    fn definition(id: &str) -> RuleDefinition {
        RuleDefinition {
            id: id.to_string(),
            title: "title".to_string(),
            description: "description".to_string(),
            resolution: "resolution".to_string(),
            resolution_urls: Vec::new(),
            audiences: vec!["Application".to_string()],
            categories: vec!["Bindings".to_string()],
            min_version: "-".to_string(),
            is_async: false,
        }
    }

    #[test]
    fn test_add_rule_stamps_lib_name() {
        let mut rule_set = RuleSet::new("testRuleSet");
        let rule = rule_set.add_rule(valid_rule("id1")).unwrap();

        assert_eq!(rule.lib_name(), "testRuleSet");
        assert_eq!(rule_set.rules().len(), 1);
        assert!(Arc::ptr_eq(rule_set.rule("id1").unwrap(), &rule));
    }

    #[test]
    fn test_add_duplicate_rule() {
        let mut rule_set = RuleSet::new("testRuleSet");
        rule_set.add_rule(valid_rule("id1")).unwrap();

        let err = rule_set.add_rule(valid_rule("id1")).unwrap_err();
        assert_eq!(
            err,
            RuleSetError::DuplicateRule {
                id: "id1".to_string(),
                rule_set: "testRuleSet".to_string(),
            }
        );
    }

    #[test]
    fn test_add_rule_validation() {
        let mut rule_set = RuleSet::new("testRuleSet");

        assert_eq!(
            rule_set.add_rule(valid_rule("")).unwrap_err(),
            RuleSetError::MissingId
        );
        assert_eq!(
            rule_set.add_rule(valid_rule("has space")).unwrap_err(),
            RuleSetError::InvalidId("has space".to_string())
        );

        let mut no_title = valid_rule("a");
        no_title.title = String::new();
        assert_eq!(
            rule_set.add_rule(no_title).unwrap_err().to_string(),
            "Support rule with the id 'a' should have a title"
        );

        let no_audience = valid_rule("b").with_audiences([]);
        assert!(matches!(
            rule_set.add_rule(no_audience),
            Err(RuleSetError::MissingField { field: "audience", .. })
        ));

        let no_category = valid_rule("c").with_categories([]);
        assert!(matches!(
            rule_set.add_rule(no_category),
            Err(RuleSetError::MissingField { field: "category", .. })
        ));

        let bad_version = valid_rule("d").with_min_version("latest");
        assert!(matches!(
            rule_set.add_rule(bad_version),
            Err(RuleSetError::InvalidMinVersion { .. })
        ));

        assert!(rule_set.rules().is_empty());
    }

    #[test]
    fn test_resolution_url_substitutes_for_resolution() {
        let mut rule_set = RuleSet::new("testRuleSet");

        let mut rule = valid_rule("id1");
        rule.resolution = String::new();
        assert_eq!(
            rule_set.add_rule(rule.clone()).unwrap_err(),
            RuleSetError::MissingResolution("id1".to_string())
        );

        let rule = rule.with_resolution_url(ResolutionUrl::new("Docs", "https://example.com"));
        assert!(rule_set.add_rule(rule).is_ok());
    }

    #[test]
    fn test_update_rule() {
        let mut rule_set = RuleSet::new("testRuleSet");
        rule_set.add_rule(valid_rule("id1")).unwrap();
        rule_set.add_rule(valid_rule("id2")).unwrap();

        let renamed = rule_set.update_rule("id1", valid_rule("id3")).unwrap();
        assert_eq!(renamed.lib_name(), "testRuleSet");
        assert!(rule_set.rule("id1").is_none());
        assert!(rule_set.rule("id3").is_some());

        assert!(matches!(
            rule_set.update_rule("id3", valid_rule("id2")),
            Err(RuleSetError::DuplicateRule { .. })
        ));
        assert_eq!(
            rule_set.update_rule("missing", valid_rule("x")).unwrap_err(),
            RuleSetError::UnknownRule("missing".to_string())
        );
    }

    #[test]
    fn test_remove_rule() {
        let mut rule_set = RuleSet::new("testRuleSet");
        rule_set.add_rule(valid_rule("id1")).unwrap();

        assert!(rule_set.remove_rule("id1").is_some());
        assert!(rule_set.remove_rule("id1").is_none());
        assert!(rule_set.rules().is_empty());
    }

    #[test]
    fn test_from_config() {
        let mut async_rule = definition("async");
        async_rule.is_async = true;
        async_rule.resolution_urls = vec![ResolutionUrlConfig {
            text: "Docs".to_string(),
            href: "https://example.com".to_string(),
        }];
        let config = RuleSetConfig {
            name: "sap.m".to_string(),
            nice_name: Some("Mobile".to_string()),
            rules: vec![definition("selectUsage"), async_rule],
        };

        let rule_set = RuleSet::from_config(&config).unwrap();
        assert_eq!(rule_set.name(), "sap.m");
        assert_eq!(rule_set.nice_name(), Some("Mobile"));

        let rule = rule_set.rule("async").unwrap();
        assert!(rule.is_async);
        assert_eq!(rule.lib_name(), "sap.m");
        assert_eq!(rule.audiences, vec![Audience::Application]);
        assert_eq!(rule.resolution_urls.len(), 1);
    }

    #[test]
    fn test_from_config_unknown_label() {
        let mut bad = definition("bad");
        bad.categories = vec!["Style".to_string()];
        let config = RuleSetConfig {
            name: "sap.m".to_string(),
            nice_name: None,
            rules: vec![bad],
        };

        let err = RuleSet::from_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Support rule with the id 'bad' uses an unknown category: 'Style'"
        );
    }

    #[test]
    fn test_all_from_config() {
        let config = SupportConfig {
            rule_sets: vec![
                RuleSetConfig {
                    name: "a".to_string(),
                    nice_name: None,
                    rules: vec![definition("r1")],
                },
                RuleSetConfig {
                    name: "b".to_string(),
                    nice_name: None,
                    rules: Vec::new(),
                },
            ],
            selected_rules: Vec::new(),
        };

        let rule_sets = RuleSet::all_from_config(&config).unwrap();
        assert_eq!(rule_sets.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(rule_sets["a"].rule("r1").unwrap().lib_name(), "a");
    }
}
