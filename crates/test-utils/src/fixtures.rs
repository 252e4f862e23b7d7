//! Ready-made rules and issues.

use std::sync::Arc;
use support_linter::{IssueDraft, Rule, RuleSet};
use support_types::{Audience, Category};

/// Name of the rule set created by [`create_test_rule_set`].
pub const TEST_RULE_SET: &str = "testRuleSet";

/// A rule that passes every rule set check.
#[must_use]
pub fn create_valid_rule(id: &str) -> Rule {
    Rule::new(
        id,
        "Test rule",
        "Test rule description",
        "Test rule resolution",
    )
    .with_audiences([Audience::Control, Audience::Application])
    .with_categories([Category::Performance, Category::Usability])
    .with_min_version("1.28")
}

/// A rule set named [`TEST_RULE_SET`] holding one valid rule per id.
///
/// Returns the rule set together with the shared handles of its rules, in
/// the order of `ids`.
///
/// # Panics
///
/// Panics if an id is rejected by the rule set, e.g. a duplicate.
#[must_use]
pub fn create_test_rule_set(ids: &[&str]) -> (RuleSet, Vec<Arc<Rule>>) {
    let mut rule_set = RuleSet::new(TEST_RULE_SET);
    let rules = ids
        .iter()
        .map(|id| {
            rule_set
                .add_rule(create_valid_rule(id))
                .unwrap_or_else(|e| panic!("fixture rule '{id}' is invalid: {e}"))
        })
        .collect();
    (rule_set, rules)
}

/// An issue draft with details, a known severity and a context id.
#[must_use]
pub fn create_valid_issue() -> IssueDraft {
    IssueDraft::new("detailsStr", "Medium", "testId")
}
