use crate::rule::Rule;
use serde::Deserialize;
use std::sync::Arc;
use support_types::Severity;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueError {
    #[error(
        "The issue from rule '{rule}' does not have proper severity defined. \
         Allowed values are High, Medium and Low"
    )]
    MissingSeverity { rule: String },

    #[error("The issue from rule '{rule}' has an unknown severity '{severity}'")]
    UnknownSeverity { rule: String, severity: String },

    #[error("The issue from rule '{rule}' should provide a context")]
    MissingContext { rule: String },

    #[error("The issue from rule '{rule}' should provide a context id")]
    MissingContextId { rule: String },

    #[error("The issue from rule '{rule}' should provide details for the generated issue")]
    MissingDetails { rule: String },

    #[error("The issue of rule '{rule_id}' does not belong to any rule set")]
    MissingRuleSet { rule_id: String },
}

/// An issue as reported by a rule, before validation.
///
/// Every field is optional so that validation can name exactly what is
/// missing. Unknown fields are ignored when deserializing; in particular a
/// caller-supplied `ruleId` has no effect, since attribution always comes
/// from the rule the facade is bound to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDraft {
    pub details: Option<String>,
    pub severity: Option<String>,
    pub context: Option<IssueContextDraft>,
    #[serde(default, rename = "async")]
    pub is_async: bool,
}

impl IssueDraft {
    #[must_use]
    pub fn new(
        details: impl Into<String>,
        severity: impl Into<String>,
        context_id: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            severity: Some(severity.into()),
            context: Some(IssueContextDraft {
                id: Some(context_id.into()),
                class_name: None,
            }),
            is_async: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueContextDraft {
    pub id: Option<String>,
    /// Class of the element the issue was found on, when the reporter knows it
    pub class_name: Option<String>,
}

/// The element an issue was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueContext {
    pub id: String,
    pub class_name: Option<String>,
}

/// A validated issue, attributed to exactly one rule and rule set.
#[derive(Debug, Clone)]
pub struct Issue {
    details: String,
    severity: Severity,
    context: IssueContext,
    is_async: bool,
    rule: Arc<Rule>,
}

impl Issue {
    /// Validate `draft` and attribute it to `rule`.
    ///
    /// Checks run in a fixed order: severity, context, context id, details.
    pub(crate) fn from_draft(draft: IssueDraft, rule: &Arc<Rule>) -> Result<Self, IssueError> {
        let rule_title = || rule.title.clone();

        let severity = draft
            .severity
            .ok_or_else(|| IssueError::MissingSeverity { rule: rule_title() })?;
        let severity: Severity = severity.parse().map_err(|_| IssueError::UnknownSeverity {
            rule: rule_title(),
            severity,
        })?;

        let context = draft
            .context
            .ok_or_else(|| IssueError::MissingContext { rule: rule_title() })?;
        let id = context
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| IssueError::MissingContextId { rule: rule_title() })?;

        let details = draft
            .details
            .filter(|details| !details.is_empty())
            .ok_or_else(|| IssueError::MissingDetails { rule: rule_title() })?;

        Ok(Self {
            details,
            severity,
            context: IssueContext {
                id,
                class_name: context.class_name,
            },
            is_async: draft.is_async,
            rule: Arc::clone(rule),
        })
    }

    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub const fn context(&self) -> &IssueContext {
        &self.context
    }

    #[must_use]
    pub const fn is_async(&self) -> bool {
        self.is_async
    }

    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    #[must_use]
    pub fn rule_id(&self) -> &str {
        &self.rule.id
    }

    /// Name of the rule set the issue's rule belongs to
    #[must_use]
    pub fn rule_lib_name(&self) -> &str {
        self.rule.lib_name()
    }
}
