use crate::constraints::StringConstraints;
use crate::error::{FormatError, ParseError, ValidateError};
use crate::value::{ModelValue, PrimitiveType};

/// Generic string type.
///
/// Converts model strings to and from the primitive representations a
/// control works with and validates them against [`StringConstraints`].
#[derive(Debug, Clone, Default)]
pub struct StringType {
    constraints: StringConstraints,
}

impl StringType {
    pub const NAME: &'static str = "sap.ui.model.type.String";

    #[must_use]
    pub fn new(constraints: StringConstraints) -> Self {
        Self { constraints }
    }

    #[must_use]
    pub const fn constraints(&self) -> &StringConstraints {
        &self.constraints
    }

    pub fn set_constraints(&mut self, constraints: StringConstraints) {
        self.constraints = constraints;
    }

    /// Format a model string into `target`.
    ///
    /// `None` formats to `None` for every target. Numbers are read from the
    /// start of the string, ignoring anything after the number; integers
    /// beyond the `i64` range saturate to `i64::MIN`/`i64::MAX`. Booleans
    /// accept `"true"`/`"X"` and `"false"`/`""`/`" "`.
    #[allow(clippy::unused_self)]
    pub fn format_value(
        &self,
        value: Option<&str>,
        target: PrimitiveType,
    ) -> Result<Option<ModelValue>, FormatError> {
        let Some(value) = value else {
            return Ok(None);
        };

        let formatted = match target {
            PrimitiveType::String | PrimitiveType::Any => ModelValue::from(value),
            PrimitiveType::Int => leading_int(value)
                .map(ModelValue::Int)
                .ok_or_else(|| invalid(value, target))?,
            PrimitiveType::Float => leading_float(value)
                .map(ModelValue::Float)
                .ok_or_else(|| invalid(value, target))?,
            PrimitiveType::Boolean => {
                if value.eq_ignore_ascii_case("true") || value == "X" {
                    ModelValue::Boolean(true)
                } else if value.eq_ignore_ascii_case("false") || value.is_empty() || value == " "
                {
                    ModelValue::Boolean(false)
                } else {
                    return Err(FormatError::UnsupportedTarget(target.to_string()));
                }
            }
        };

        Ok(Some(formatted))
    }

    /// Parse a value given in `source` representation into a model string.
    #[allow(clippy::unused_self)]
    pub fn parse_value(
        &self,
        value: &ModelValue,
        source: PrimitiveType,
    ) -> Result<Option<String>, ParseError> {
        match source {
            PrimitiveType::String
            | PrimitiveType::Boolean
            | PrimitiveType::Int
            | PrimitiveType::Float => Ok(Some(value.to_string())),
            PrimitiveType::Any => Err(ParseError::UnsupportedSource(source.to_string())),
        }
    }

    /// Check `value` against every configured constraint.
    ///
    /// All violations are collected into a single error.
    pub fn validate_value(&self, value: &str) -> Result<(), ValidateError> {
        let c = &self.constraints;
        let mut violated = Vec::new();
        let mut messages = Vec::new();
        let mut check = |name: &str, ok: bool, message: String| {
            if !ok {
                violated.push(name.to_string());
                messages.push(message);
            }
        };

        let length = value.chars().count();
        if let Some(max) = c.max_length {
            check(
                "maxLength",
                length <= max,
                format!("Enter a value with no more than {max} characters"),
            );
        }
        if let Some(min) = c.min_length {
            check(
                "minLength",
                length >= min,
                format!("Enter a value with at least {min} characters"),
            );
        }
        if let Some(prefix) = &c.starts_with {
            check(
                "startsWith",
                value.starts_with(prefix.as_str()),
                format!("Enter a value starting with {prefix}"),
            );
        }
        if let Some(prefix) = &c.starts_with_ignore_case {
            check(
                "startsWithIgnoreCase",
                value.to_lowercase().starts_with(&prefix.to_lowercase()),
                format!("Enter a value starting with {prefix}"),
            );
        }
        if let Some(suffix) = &c.ends_with {
            check(
                "endsWith",
                value.ends_with(suffix.as_str()),
                format!("Enter a value ending with {suffix}"),
            );
        }
        if let Some(suffix) = &c.ends_with_ignore_case {
            check(
                "endsWithIgnoreCase",
                value.to_lowercase().ends_with(&suffix.to_lowercase()),
                format!("Enter a value ending with {suffix}"),
            );
        }
        if let Some(needle) = &c.contains {
            check(
                "contains",
                value.contains(needle.as_str()),
                format!("Enter a value containing {needle}"),
            );
        }
        if let Some(expected) = &c.equals {
            check(
                "equals",
                value == expected,
                format!("Enter a value equal to {expected}"),
            );
        }
        if let Some(regex) = &c.search {
            check(
                "search",
                regex.is_match(value),
                format!("Enter a value matching {}", regex.as_str()),
            );
        }

        if violated.is_empty() {
            Ok(())
        } else {
            Err(ValidateError {
                message: messages.join(" "),
                violated_constraints: violated,
            })
        }
    }
}

fn invalid(value: &str, target: PrimitiveType) -> FormatError {
    FormatError::InvalidValue {
        value: value.to_string(),
        target,
    }
}

/// Length in bytes of an optional sign followed by ASCII digits at the start
/// of `s`, or `None` if there are no digits.
fn signed_digits(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    (digits > 0).then_some(sign + digits)
}

/// Integers outside the `i64` range saturate.
fn leading_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let digits = &s[..signed_digits(s)?];
    let saturated = if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    };
    Some(digits.parse().unwrap_or(saturated))
}

fn leading_float(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();

    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[sign..].starts_with("Infinity") {
        return s[..sign + "Infinity".len()].parse().ok();
    }

    let int_digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    let mut end = sign + int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        if let Some(exponent) = signed_digits(&s[end + 1..]) {
            end += 1 + exponent;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_null_for_every_target() {
        let ty = StringType::default();
        for target in [
            PrimitiveType::String,
            PrimitiveType::Int,
            PrimitiveType::Float,
            PrimitiveType::Boolean,
            PrimitiveType::Any,
        ] {
            assert_eq!(ty.format_value(None, target), Ok(None));
        }
    }

    #[test]
    fn test_format_to_string() {
        let ty = StringType::default();
        assert_eq!(
            ty.format_value(Some("foo"), PrimitiveType::String),
            Ok(Some(ModelValue::from("foo")))
        );
        assert_eq!(
            ty.format_value(Some("foo"), PrimitiveType::Any),
            Ok(Some(ModelValue::from("foo")))
        );
    }

    #[test]
    fn test_format_to_int() {
        let ty = StringType::default();
        assert_eq!(
            ty.format_value(Some("42"), PrimitiveType::Int),
            Ok(Some(ModelValue::Int(42)))
        );
        assert_eq!(
            ty.format_value(Some("  -7 apples"), PrimitiveType::Int),
            Ok(Some(ModelValue::Int(-7)))
        );
        assert_eq!(
            ty.format_value(Some("abc"), PrimitiveType::Int),
            Err(FormatError::InvalidValue {
                value: "abc".to_string(),
                target: PrimitiveType::Int,
            })
        );
    }

    #[test]
    fn test_format_to_int_saturates() {
        let ty = StringType::default();
        assert_eq!(
            ty.format_value(Some("99999999999999999999"), PrimitiveType::Int),
            Ok(Some(ModelValue::Int(i64::MAX)))
        );
        assert_eq!(
            ty.format_value(Some("-99999999999999999999 items"), PrimitiveType::Int),
            Ok(Some(ModelValue::Int(i64::MIN)))
        );
        assert_eq!(
            ty.format_value(Some("+9223372036854775807"), PrimitiveType::Int),
            Ok(Some(ModelValue::Int(i64::MAX)))
        );
    }

    #[test]
    fn test_format_to_float() {
        let ty = StringType::default();
        assert_eq!(
            ty.format_value(Some("3.25kg"), PrimitiveType::Float),
            Ok(Some(ModelValue::Float(3.25)))
        );
        assert_eq!(
            ty.format_value(Some(".5"), PrimitiveType::Float),
            Ok(Some(ModelValue::Float(0.5)))
        );
        assert_eq!(
            ty.format_value(Some("1e3"), PrimitiveType::Float),
            Ok(Some(ModelValue::Float(1000.0)))
        );
        assert_eq!(
            ty.format_value(Some("2e"), PrimitiveType::Float),
            Ok(Some(ModelValue::Float(2.0)))
        );
        assert_eq!(
            ty.format_value(Some("-Infinity"), PrimitiveType::Float),
            Ok(Some(ModelValue::Float(f64::NEG_INFINITY)))
        );
        assert!(ty.format_value(Some("."), PrimitiveType::Float).is_err());
    }

    #[test]
    fn test_format_to_boolean() {
        let ty = StringType::default();
        for (input, expected) in [("true", true), ("TRUE", true), ("X", true)] {
            assert_eq!(
                ty.format_value(Some(input), PrimitiveType::Boolean),
                Ok(Some(ModelValue::Boolean(expected)))
            );
        }
        for input in ["false", "False", "", " "] {
            assert_eq!(
                ty.format_value(Some(input), PrimitiveType::Boolean),
                Ok(Some(ModelValue::Boolean(false)))
            );
        }
        assert_eq!(
            ty.format_value(Some("maybe"), PrimitiveType::Boolean),
            Err(FormatError::UnsupportedTarget("boolean".to_string()))
        );
    }

    #[test]
    fn test_parse_value() {
        let ty = StringType::default();
        assert_eq!(
            ty.parse_value(&ModelValue::from("foo"), PrimitiveType::String),
            Ok(Some("foo".to_string()))
        );
        assert_eq!(
            ty.parse_value(&ModelValue::from(12), PrimitiveType::Int),
            Ok(Some("12".to_string()))
        );
        assert_eq!(
            ty.parse_value(&ModelValue::from(false), PrimitiveType::Boolean),
            Ok(Some("false".to_string()))
        );
        assert_eq!(
            ty.parse_value(&ModelValue::from("foo"), PrimitiveType::Any),
            Err(ParseError::UnsupportedSource("any".to_string()))
        );
    }

    #[test]
    fn test_validate_without_constraints() {
        assert!(StringType::default().validate_value("anything").is_ok());
    }

    #[test]
    fn test_validate_max_length_counts_characters() {
        let ty = StringType::new(StringConstraints::with_max_length(3));
        assert!(ty.validate_value("äöü").is_ok());

        let err = ty.validate_value("abcd").unwrap_err();
        assert_eq!(err.violated_constraints, vec!["maxLength"]);
        assert_eq!(err.message, "Enter a value with no more than 3 characters");
    }

    #[test]
    fn test_validate_collects_all_violations() {
        let ty = StringType::new(StringConstraints::from_value(&json!({
            "minLength": 5,
            "startsWith": "A",
            "contains": "z",
            "search": "^[0-9]+$"
        })));

        let err = ty.validate_value("bcd").unwrap_err();
        insta::assert_snapshot!(err.violated_constraints.join("\n"), @r###"
        minLength
        startsWith
        contains
        search
        "###);
        assert_eq!(
            err.message,
            "Enter a value with at least 5 characters Enter a value starting with A \
             Enter a value containing z Enter a value matching ^[0-9]+$"
        );
    }

    #[test]
    fn test_validate_ignore_case_constraints() {
        let ty = StringType::new(StringConstraints::from_value(&json!({
            "startsWithIgnoreCase": "ab",
            "endsWithIgnoreCase": "YZ"
        })));
        assert!(ty.validate_value("ABcxyz").is_ok());
        assert!(ty.validate_value("xbcxyz").is_err());
    }

    #[test]
    fn test_validate_equals_and_ends_with() {
        let ty = StringType::new(StringConstraints::from_value(&json!({
            "equals": "done",
            "endsWith": "ne"
        })));
        assert!(ty.validate_value("done").is_ok());

        let err = ty.validate_value("gone").unwrap_err();
        assert_eq!(err.violated_constraints, vec!["equals"]);
    }
}
