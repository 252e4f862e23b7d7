//! Snapshot testing assertions for issue view models
//!
//! This module provides helpers for snapshot testing with insta.
//! Issues are formatted consistently for readable snapshots.

use support_linter::{GroupedIssues, IssueViewModel, RulesViewModel};

/// Format flat issue rows, one line each.
///
/// # Example
///
/// ```ignore
/// use support_test_utils::assertions::format_issues;
///
/// insta::assert_snapshot!(format_issues(&manager.issues_model()));
/// ```
#[must_use]
pub fn format_issues(issues: &[IssueViewModel]) -> String {
    if issues.is_empty() {
        return String::from("(no issues)");
    }

    issues
        .iter()
        .enumerate()
        .map(|(i, issue)| format!("[{}] {}", i + 1, format_issue(issue)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format grouped issues as an indented `rule set > rule > issue` tree.
#[must_use]
pub fn format_grouped_issues(grouped: &GroupedIssues) -> String {
    if grouped.is_empty() {
        return String::from("(no issues)");
    }

    let mut lines = Vec::new();
    for (rule_set, rules) in grouped {
        lines.push(rule_set.clone());
        for (rule_id, issues) in rules {
            lines.push(format!("  {rule_id}"));
            for issue in issues {
                lines.push(format!("    {}", format_issue(issue)));
            }
        }
    }
    lines.join("\n")
}

/// Format a rules view with selection markers and issue counts.
#[must_use]
pub fn format_rules_view(view: &RulesViewModel) -> String {
    if view.is_empty() {
        return String::from("(no rule sets)");
    }

    let mut lines = Vec::new();
    for (name, library) in view {
        lines.push(format!(
            "{} {name} ({} issues)",
            marker(library.selected),
            library.issue_count
        ));
        for (rule_id, rule) in &library.rules {
            lines.push(format!(
                "  {} {rule_id} ({} issues)",
                marker(rule.selected),
                rule.issue_count
            ));
        }
    }
    lines.join("\n")
}

fn format_issue(issue: &IssueViewModel) -> String {
    format!(
        "{} {}/{} @{}: {}",
        issue.severity, issue.rule_lib_name, issue.rule_id, issue.context.id, issue.details
    )
}

const fn marker(selected: bool) -> &'static str {
    if selected {
        "[x]"
    } else {
        "[ ]"
    }
}
