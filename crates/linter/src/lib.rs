mod issue;
mod manager;
mod rule;
mod rule_set;
mod view_model;

pub use issue::{Issue, IssueContext, IssueContextDraft, IssueDraft, IssueError};
pub use manager::{HistoryEntry, IssueManager, IssueManagerFacade};
pub use rule::{ResolutionUrl, Rule};
pub use rule_set::{RuleSet, RuleSetError};
pub use view_model::{
    ConvertedHistoryEntry, GroupedIssues, IssueContextViewModel, IssueViewModel, LibraryInfo,
    LibraryViewModel, RuleViewModel, RulesViewModel,
};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use support_linter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::issue::{Issue, IssueDraft, IssueError};
    pub use crate::manager::{IssueManager, IssueManagerFacade};
    pub use crate::rule::Rule;
    pub use crate::rule_set::RuleSet;
    pub use support_types::{Audience, Category, Severity};
}
