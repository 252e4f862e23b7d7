use regex::Regex;
use serde_json::Value;

/// Constraints of the generic [`StringType`](crate::StringType).
///
/// Every field is optional; an absent field does not constrain the value.
/// Lengths are counted in characters.
#[derive(Debug, Clone, Default)]
pub struct StringConstraints {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub starts_with: Option<String>,
    pub starts_with_ignore_case: Option<String>,
    pub ends_with: Option<String>,
    pub ends_with_ignore_case: Option<String>,
    pub contains: Option<String>,
    pub equals: Option<String>,
    /// The value must contain a match for this pattern
    pub search: Option<Regex>,
}

impl StringConstraints {
    /// Constraints that only limit the length.
    #[must_use]
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
            ..Self::default()
        }
    }

    /// Returns true if no constraint is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.starts_with.is_none()
            && self.starts_with_ignore_case.is_none()
            && self.ends_with.is_none()
            && self.ends_with_ignore_case.is_none()
            && self.contains.is_none()
            && self.equals.is_none()
            && self.search.is_none()
    }

    /// Build constraints from a loosely typed JSON object such as
    /// `{"maxLength": 10, "startsWith": "A"}`.
    ///
    /// Malformed fields are dropped with a warning instead of failing the
    /// whole set. Keys this type does not know are ignored.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let mut constraints = Self::default();
        let Some(object) = value.as_object() else {
            return constraints;
        };

        for (key, content) in object {
            match key.as_str() {
                "minLength" => constraints.min_length = length(key, content),
                "maxLength" => constraints.max_length = length(key, content),
                "startsWith" => constraints.starts_with = text(key, content),
                "startsWithIgnoreCase" => constraints.starts_with_ignore_case = text(key, content),
                "endsWith" => constraints.ends_with = text(key, content),
                "endsWithIgnoreCase" => constraints.ends_with_ignore_case = text(key, content),
                "contains" => constraints.contains = text(key, content),
                "equals" => constraints.equals = text(key, content),
                "search" => constraints.search = pattern(content),
                _ => tracing::trace!(constraint = key.as_str(), "Ignoring unknown constraint"),
            }
        }

        constraints
    }
}

/// Read a JSON number as a character count. Fractional counts are floored,
/// so a maximum of `2.5` admits the same values as `2`.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn json_length(content: &Value) -> Option<usize> {
    let n = content.as_f64().filter(|n| n.is_finite() && *n >= 0.0)?;
    Some(n.floor() as usize)
}

fn length(key: &str, content: &Value) -> Option<usize> {
    let length = json_length(content);
    if length.is_none() {
        tracing::warn!(constraint = key, value = %content, "Illegal length constraint");
    }
    length
}

fn text(key: &str, content: &Value) -> Option<String> {
    let text = content.as_str().map(str::to_string);
    if text.is_none() {
        tracing::warn!(constraint = key, value = %content, "Illegal text constraint");
    }
    text
}

fn pattern(content: &Value) -> Option<Regex> {
    let Some(source) = content.as_str() else {
        tracing::warn!(value = %content, "Illegal search constraint");
        return None;
    };
    match Regex::new(source) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!(pattern = source, error = %e, "Invalid search pattern");
            None
        }
    }
}
