use serde::Serialize;
use support_types::{Audience, Category};

/// A link to documentation explaining how to resolve an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionUrl {
    pub text: String,
    pub href: String,
}

impl ResolutionUrl {
    #[must_use]
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// Static metadata of a support rule.
///
/// The name of the owning rule set is not part of the definition; it is
/// stamped by [`RuleSet::add_rule`](crate::RuleSet::add_rule) and can only be
/// read back through [`Rule::lib_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub id: String,
    pub title: String,
    pub description: String,
    pub resolution: String,
    pub resolution_urls: Vec<ResolutionUrl>,
    pub audiences: Vec<Audience>,
    pub categories: Vec<Category>,
    /// Minimum framework version the rule applies to, or `"-"` for any
    pub min_version: String,
    /// Whether the rule reports its issues asynchronously
    pub is_async: bool,
    lib_name: String,
}

impl Rule {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        resolution: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            resolution: resolution.into(),
            resolution_urls: Vec::new(),
            audiences: Vec::new(),
            categories: Vec::new(),
            min_version: "-".to_string(),
            is_async: false,
            lib_name: String::new(),
        }
    }

    #[must_use]
    pub fn with_audiences(mut self, audiences: impl IntoIterator<Item = Audience>) -> Self {
        self.audiences = audiences.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_resolution_url(mut self, url: ResolutionUrl) -> Self {
        self.resolution_urls.push(url);
        self
    }

    #[must_use]
    pub fn with_min_version(mut self, min_version: impl Into<String>) -> Self {
        self.min_version = min_version.into();
        self
    }

    #[must_use]
    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    /// Name of the rule set this rule belongs to; empty until the rule has
    /// been added to a rule set.
    #[must_use]
    pub fn lib_name(&self) -> &str {
        &self.lib_name
    }

    pub(crate) fn set_lib_name(&mut self, lib_name: &str) {
        lib_name.clone_into(&mut self.lib_name);
    }
}
