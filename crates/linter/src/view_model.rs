//! Display-oriented projections of issues and rules.
//!
//! View models are plain serializable data; they hold copies of the rule
//! metadata so they can outlive the rule sets they were built from.

use crate::issue::{Issue, IssueError};
use crate::rule::{ResolutionUrl, Rule};
use crate::rule_set::RuleSet;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;
use support_types::{Audience, Category, Severity};

/// Context id that denotes the page as a whole rather than an element on it
const WEB_PAGE_CONTEXT_ID: &str = "WEBPAGE";
const WEB_PAGE_CLASS_NAME: &str = "SAPUI5 Web Page";

/// Issues grouped by rule set name, then by rule id.
pub type GroupedIssues = BTreeMap<String, BTreeMap<String, Vec<IssueViewModel>>>;

/// Rules view keyed by rule set name.
pub type RulesViewModel = BTreeMap<String, LibraryViewModel>;

/// A single issue row, enriched with the metadata of the rule that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueViewModel {
    #[serde(serialize_with = "display")]
    pub severity: Severity,
    /// Title of the rule
    pub name: String,
    pub description: String,
    pub resolution: String,
    pub resolution_urls: Vec<ResolutionUrl>,
    #[serde(serialize_with = "display_all")]
    pub audiences: Vec<Audience>,
    #[serde(serialize_with = "display_all")]
    pub categories: Vec<Category>,
    pub details: String,
    pub rule_lib_name: String,
    pub rule_id: String,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub min_version: String,
    pub context: IssueContextViewModel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueContextViewModel {
    pub id: String,
    pub class_name: String,
}

impl From<&Issue> for IssueViewModel {
    fn from(issue: &Issue) -> Self {
        let rule = issue.rule();
        let context = issue.context();
        let class_name = match &context.class_name {
            Some(class_name) => class_name.clone(),
            None if context.id == WEB_PAGE_CONTEXT_ID => WEB_PAGE_CLASS_NAME.to_string(),
            None => String::new(),
        };

        Self {
            severity: issue.severity(),
            name: rule.title.clone(),
            description: rule.description.clone(),
            resolution: rule.resolution.clone(),
            resolution_urls: rule.resolution_urls.clone(),
            audiences: rule.audiences.clone(),
            categories: rule.categories.clone(),
            details: issue.details().to_string(),
            rule_lib_name: issue.rule_lib_name().to_string(),
            rule_id: issue.rule_id().to_string(),
            is_async: issue.is_async(),
            min_version: rule.min_version.clone(),
            context: IssueContextViewModel {
                id: context.id.clone(),
                class_name,
            },
        }
    }
}

/// A history entry with its issues in grouped form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedHistoryEntry {
    pub sequence: u64,
    pub issues: GroupedIssues,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryInfo {
    pub name: String,
}

/// One rule set in the rules view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryViewModel {
    pub lib: LibraryInfo,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nice_name: Option<String>,
    /// True if any of the rule set's rules is selected
    pub selected: bool,
    pub issue_count: usize,
    pub rules: BTreeMap<String, RuleViewModel>,
}

/// One rule in the rules view, with the issues it found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleViewModel {
    pub id: String,
    pub title: String,
    pub description: String,
    pub resolution: String,
    pub resolution_urls: Vec<ResolutionUrl>,
    #[serde(serialize_with = "display_all")]
    pub audiences: Vec<Audience>,
    #[serde(serialize_with = "display_all")]
    pub categories: Vec<Category>,
    pub min_version: String,
    pub lib_name: String,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub selected: bool,
    pub issue_count: usize,
    pub issues: Vec<IssueViewModel>,
}

impl RuleViewModel {
    fn new(rule: &Rule, selected: bool, issues: Vec<IssueViewModel>) -> Self {
        Self {
            id: rule.id.clone(),
            title: rule.title.clone(),
            description: rule.description.clone(),
            resolution: rule.resolution.clone(),
            resolution_urls: rule.resolution_urls.clone(),
            audiences: rule.audiences.clone(),
            categories: rule.categories.clone(),
            min_version: rule.min_version.clone(),
            lib_name: rule.lib_name().to_string(),
            is_async: rule.is_async,
            selected,
            issue_count: issues.len(),
            issues,
        }
    }
}

pub(crate) fn convert_to_view_model(issues: &[Issue]) -> Vec<IssueViewModel> {
    issues.iter().map(IssueViewModel::from).collect()
}

pub(crate) fn group_issues(issues: &[IssueViewModel]) -> Result<GroupedIssues, IssueError> {
    let mut grouped = GroupedIssues::new();
    for issue in issues {
        if issue.rule_lib_name.is_empty() {
            return Err(IssueError::MissingRuleSet {
                rule_id: issue.rule_id.clone(),
            });
        }
        grouped
            .entry(issue.rule_lib_name.clone())
            .or_default()
            .entry(issue.rule_id.clone())
            .or_default()
            .push(issue.clone());
    }
    Ok(grouped)
}

pub(crate) fn rules_view_model(
    rule_sets: &BTreeMap<String, RuleSet>,
    selected_rule_ids: &HashSet<String>,
    grouped: &GroupedIssues,
) -> RulesViewModel {
    let mut view = RulesViewModel::new();

    for (name, rule_set) in rule_sets {
        let library_issues = grouped.get(name);
        let mut library = LibraryViewModel {
            lib: LibraryInfo { name: name.clone() },
            name: name.clone(),
            nice_name: rule_set.nice_name().map(str::to_string),
            selected: false,
            issue_count: 0,
            rules: BTreeMap::new(),
        };

        for (id, rule) in rule_set.rules() {
            let selected = selected_rule_ids.contains(id);
            let issues = library_issues
                .and_then(|by_rule| by_rule.get(id))
                .cloned()
                .unwrap_or_default();
            let rule_view = RuleViewModel::new(rule, selected, issues);

            library.selected |= selected;
            library.issue_count += rule_view.issue_count;
            library.rules.insert(id.clone(), rule_view);
        }

        view.insert(name.clone(), library);
    }

    view
}

fn display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[allow(clippy::ptr_arg)]
fn display_all<T: Display, S: Serializer>(values: &Vec<T>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(ToString::to_string))
}
