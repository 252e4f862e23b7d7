//! The issue store of an analysis session.
//!
//! Rules report issues through an [`IssueManagerFacade`] bound to
//! themselves. The store keeps them in insertion order until the host ends a
//! pass with [`IssueManager::clear_issues`], which moves them into history.
//!
//! ```text
//! rule --add_issue--> facade --stamp rule--> current issues
//!                                                 |
//!                                          clear_issues()
//!                                                 v
//!                                             history[n]
//! ```

use crate::issue::{Issue, IssueDraft, IssueError};
use crate::rule::Rule;
use crate::rule_set::RuleSet;
use crate::view_model::{
    self, ConvertedHistoryEntry, GroupedIssues, IssueViewModel, RulesViewModel,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Snapshot of all issues reported between two calls of
/// [`IssueManager::clear_issues`].
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// 1-based position of the snapshot within the session
    pub sequence: u64,
    pub issues: Vec<Issue>,
}

/// In-memory issue store for one analysis session.
///
/// There is a single writer at a time: facades borrow the store mutably.
/// Hosts that share a store between threads wrap it in a `Mutex`.
#[derive(Debug, Default)]
pub struct IssueManager {
    issues: Vec<Issue>,
    history: Vec<HistoryEntry>,
    last_sequence: u64,
}

impl IssueManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle through which `rule` reports its issues.
    ///
    /// The facade stamps every issue with the rule's id and rule set, so
    /// reporters cannot attribute issues to other rules.
    pub fn create_issue_manager_facade(&mut self, rule: &Arc<Rule>) -> IssueManagerFacade<'_> {
        IssueManagerFacade {
            manager: self,
            rule: Arc::clone(rule),
        }
    }

    /// Append an already validated issue.
    pub fn add_issue(&mut self, issue: Issue) {
        tracing::trace!(
            rule = issue.rule_id(),
            rule_set = issue.rule_lib_name(),
            severity = %issue.severity(),
            "Issue added"
        );
        self.issues.push(issue);
    }

    /// Visit every current issue in insertion order.
    pub fn walk_issues(&self, visitor: impl FnMut(&Issue)) {
        self.issues.iter().for_each(visitor);
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Move the current issues into a new history entry.
    ///
    /// An entry is appended even when there are no current issues.
    pub fn clear_issues(&mut self) {
        self.last_sequence += 1;
        let issues = std::mem::take(&mut self.issues);
        tracing::debug!(
            sequence = self.last_sequence,
            issues = issues.len(),
            "Issues moved to history"
        );
        self.history.push(HistoryEntry {
            sequence: self.last_sequence,
            issues,
        });
    }

    pub fn clear_history(&mut self) {
        tracing::debug!(entries = self.history.len(), "History cleared");
        self.history.clear();
    }

    /// All history entries, oldest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Move the current issues into history, then return the history.
    pub fn snapshot_history(&mut self) -> &[HistoryEntry] {
        self.clear_issues();
        &self.history
    }

    /// Flat view model of the current issues, in insertion order.
    #[must_use]
    pub fn issues_model(&self) -> Vec<IssueViewModel> {
        Self::convert_to_view_model(&self.issues)
    }

    #[must_use]
    pub fn issues_view_model(&self) -> Vec<IssueViewModel> {
        self.issues_model()
    }

    #[must_use]
    pub fn convert_to_view_model(issues: &[Issue]) -> Vec<IssueViewModel> {
        view_model::convert_to_view_model(issues)
    }

    /// Group flat issue rows by rule set, then by rule.
    ///
    /// Fails for a row whose rule does not belong to a rule set.
    pub fn group_issues(issues: &[IssueViewModel]) -> Result<GroupedIssues, IssueError> {
        view_model::group_issues(issues)
    }

    /// Every history entry with its issues in grouped form.
    pub fn converted_history(&self) -> Result<Vec<ConvertedHistoryEntry>, IssueError> {
        let mut converted = Vec::with_capacity(self.history.len());
        for entry in &self.history {
            let issues = Self::group_issues(&Self::convert_to_view_model(&entry.issues))?;
            converted.push(ConvertedHistoryEntry {
                sequence: entry.sequence,
                issues,
            });
        }
        Ok(converted)
    }

    /// Join rule metadata with grouped issues.
    ///
    /// Every rule set in `rule_sets` is present in the result, with empty
    /// issue lists if `grouped` has nothing for it.
    #[must_use]
    pub fn rules_view_model(
        rule_sets: &BTreeMap<String, RuleSet>,
        selected_rule_ids: &HashSet<String>,
        grouped: &GroupedIssues,
    ) -> RulesViewModel {
        view_model::rules_view_model(rule_sets, selected_rule_ids, grouped)
    }

    /// End the session: drop current issues and history and restart the
    /// sequence.
    pub fn reset(&mut self) {
        tracing::debug!("Issue manager reset");
        *self = Self::default();
    }
}

/// Rule-bound handle for reporting issues.
pub struct IssueManagerFacade<'a> {
    manager: &'a mut IssueManager,
    rule: Arc<Rule>,
}

impl IssueManagerFacade<'_> {
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Validate `draft`, attribute it to the bound rule and store it.
    ///
    /// A rejected draft leaves the store untouched.
    pub fn add_issue(&mut self, draft: IssueDraft) -> Result<(), IssueError> {
        match Issue::from_draft(draft, &self.rule) {
            Ok(issue) => {
                self.manager.add_issue(issue);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(rule = %self.rule.id, error = %e, "Issue rejected");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use support_types::{Audience, Category, Severity};

    fn bound_rule() -> Arc<Rule> {
        let mut rule_set = RuleSet::new("testRuleSet");
        rule_set
            .add_rule(
                Rule::new("id1", "Test rule", "description", "resolution")
                    .with_audiences([Audience::Control])
                    .with_categories([Category::Performance]),
            )
            .unwrap()
    }

    fn add_valid(manager: &mut IssueManager, rule: &Arc<Rule>, count: usize) {
        let mut facade = manager.create_issue_manager_facade(rule);
        for _ in 0..count {
            facade
                .add_issue(IssueDraft::new("detailsStr", "Medium", "testId"))
                .unwrap();
        }
    }

    #[test]
    fn test_facade_stamps_rule() {
        let rule = bound_rule();
        let mut manager = IssueManager::new();
        add_valid(&mut manager, &rule, 1);

        let issue = &manager.issues()[0];
        assert_eq!(issue.rule_id(), "id1");
        assert_eq!(issue.rule_lib_name(), "testRuleSet");
        assert_eq!(issue.severity(), Severity::Medium);
    }

    #[test]
    fn test_rejected_issue_leaves_store_unchanged() {
        let rule = bound_rule();
        let mut manager = IssueManager::new();
        add_valid(&mut manager, &rule, 2);

        let mut facade = manager.create_issue_manager_facade(&rule);
        let mut draft = IssueDraft::new("detailsStr", "Medium", "testId");
        draft.severity = Some("Critical".to_string());
        assert!(facade.add_issue(draft).is_err());

        assert_eq!(manager.issues().len(), 2);
    }

    #[test]
    fn test_clear_issues_sequences() {
        let rule = bound_rule();
        let mut manager = IssueManager::new();
        add_valid(&mut manager, &rule, 3);
        manager.clear_issues();
        manager.clear_issues();

        let sequences: Vec<_> = manager.history().iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![1, 2]);
        assert_eq!(manager.history()[0].issues.len(), 3);
        assert!(manager.history()[1].issues.is_empty());
        assert!(manager.issues().is_empty());
    }

    #[test]
    fn test_snapshot_history_flushes_current_issues() {
        let rule = bound_rule();
        let mut manager = IssueManager::new();
        add_valid(&mut manager, &rule, 4);

        let history = manager.snapshot_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].issues.len(), 4);
        assert!(manager.issues().is_empty());
    }

    #[test]
    fn test_clear_history_keeps_current_issues() {
        let rule = bound_rule();
        let mut manager = IssueManager::new();
        add_valid(&mut manager, &rule, 1);
        manager.clear_issues();
        add_valid(&mut manager, &rule, 2);

        manager.clear_history();
        assert!(manager.history().is_empty());
        assert_eq!(manager.issues().len(), 2);
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let rule = bound_rule();
        let mut manager = IssueManager::new();
        add_valid(&mut manager, &rule, 1);
        manager.clear_issues();
        add_valid(&mut manager, &rule, 1);

        manager.reset();
        assert!(manager.issues().is_empty());
        assert!(manager.history().is_empty());

        manager.clear_issues();
        assert_eq!(manager.history()[0].sequence, 1);
    }

    #[test]
    fn test_converted_history_fails_for_unattributed_rule() {
        let orphan = Arc::new(
            Rule::new("orphan", "Orphan", "description", "resolution")
                .with_audiences([Audience::Control])
                .with_categories([Category::Other]),
        );
        let mut manager = IssueManager::new();
        add_valid(&mut manager, &orphan, 1);
        manager.clear_issues();

        assert!(matches!(
            manager.converted_history(),
            Err(IssueError::MissingRuleSet { .. })
        ));
    }
}
