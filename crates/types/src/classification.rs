//! Classification of rules: who an issue is relevant for ([`Audience`]) and
//! what area it concerns ([`Category`]).

use crate::severity::UnknownVariant;
use std::str::FromStr;

/// Who a rule's findings are addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Audience {
    /// Developers of controls
    Control,
    /// Framework-internal developers
    Internal,
    /// Application developers
    Application,
}

impl Audience {
    pub const ALL: [Self; 3] = [Self::Control, Self::Internal, Self::Application];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Control => "Control",
            Self::Internal => "Internal",
            Self::Application => "Application",
        }
    }
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Audience {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|audience| audience.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("audience", s))
    }
}

/// The area a rule checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Accessibility,
    Performance,
    Memory,
    Bindings,
    Consistency,
    FioriGuidelines,
    Functionality,
    Usability,
    DataModel,
    Modularization,
    Usage,
    Other,
}

impl Category {
    pub const ALL: [Self; 12] = [
        Self::Accessibility,
        Self::Performance,
        Self::Memory,
        Self::Bindings,
        Self::Consistency,
        Self::FioriGuidelines,
        Self::Functionality,
        Self::Usability,
        Self::DataModel,
        Self::Modularization,
        Self::Usage,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accessibility => "Accessibility",
            Self::Performance => "Performance",
            Self::Memory => "Memory",
            Self::Bindings => "Bindings",
            Self::Consistency => "Consistency",
            Self::FioriGuidelines => "FioriGuidelines",
            Self::Functionality => "Functionality",
            Self::Usability => "Usability",
            Self::DataModel => "DataModel",
            Self::Modularization => "Modularization",
            Self::Usage => "Usage",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("category", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audience_round_trips_through_label() {
        for audience in Audience::ALL {
            assert_eq!(audience.as_str().parse::<Audience>(), Ok(audience));
        }
    }

    #[test]
    fn test_category_round_trips_through_label() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_unknown_audience() {
        let err = "Everyone".parse::<Audience>().unwrap_err();
        assert_eq!(err.kind(), "audience");
    }

    #[test]
    fn test_unknown_category() {
        let err = "Style".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: 'Style'");
    }
}
