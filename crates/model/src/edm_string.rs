//! The OData primitive type `Edm.String`.

use crate::constraints::{json_length, StringConstraints};
use crate::error::{FormatError, ParseError, ValidateError};
use crate::string::StringType;
use crate::value::{ModelValue, PrimitiveType};
use serde_json::Value;

/// Normalized constraints of [`EdmString`].
///
/// `max_length` is always positive when set. `nullable` is only ever stored
/// as `Some(false)`; absent means `null` is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdmStringConstraints {
    pub max_length: Option<usize>,
    pub nullable: Option<bool>,
}

impl EdmStringConstraints {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_length: None,
            nullable: None,
        }
    }

    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    #[must_use]
    pub const fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    /// Whether `null` is an acceptable model value.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        !matches!(self.nullable, Some(false))
    }
}

/// OData `Edm.String`.
///
/// Formatting delegates to [`StringType`]. Parsing maps `""` to `None`, and
/// validation accepts `None` unless the type is constrained to be
/// non-nullable.
#[derive(Debug, Clone, Default)]
pub struct EdmString {
    base: StringType,
    constraints: EdmStringConstraints,
}

impl EdmString {
    pub const NAME: &'static str = "sap.ui.model.odata.type.String";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_constraints(constraints: EdmStringConstraints) -> Self {
        let mut ty = Self::default();
        ty.set_constraints(constraints);
        ty
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        Self::NAME
    }

    #[must_use]
    pub const fn constraints(&self) -> &EdmStringConstraints {
        &self.constraints
    }

    pub fn format_value(
        &self,
        value: Option<&str>,
        target: PrimitiveType,
    ) -> Result<Option<ModelValue>, FormatError> {
        self.base.format_value(value, target)
    }

    /// Parse `value` into a model string; the empty string becomes `None`.
    pub fn parse_value(
        &self,
        value: &ModelValue,
        source: PrimitiveType,
    ) -> Result<Option<String>, ParseError> {
        if matches!(value, ModelValue::String(s) if s.is_empty()) {
            return Ok(None);
        }
        self.base.parse_value(value, source)
    }

    pub fn validate_value(&self, value: Option<&str>) -> Result<(), ValidateError> {
        match value {
            None if self.constraints.is_nullable() => Ok(()),
            None => Err(ValidateError {
                message: format!("Illegal {} value: null", Self::NAME),
                violated_constraints: vec!["nullable".to_string()],
            }),
            Some(value) => self.base.validate_value(value),
        }
    }

    /// Replace the constraints.
    ///
    /// A zero `max_length` is dropped with a warning; `nullable: true` is the
    /// default and is not stored.
    pub fn set_constraints(&mut self, constraints: EdmStringConstraints) {
        let mut normalized = EdmStringConstraints::new();

        match constraints.max_length {
            Some(0) => tracing::warn!(type_name = Self::NAME, "Illegal maxLength: 0"),
            max_length => normalized.max_length = max_length,
        }
        if constraints.nullable == Some(false) {
            normalized.nullable = Some(false);
        }

        self.apply(normalized);
    }

    /// Replace the constraints from a loosely typed JSON object such as
    /// `{"maxLength": 10, "nullable": false}`.
    ///
    /// Fields that are not well-formed are dropped with a warning; the call
    /// itself never fails.
    pub fn set_constraints_from_value(&mut self, constraints: Option<&Value>) {
        let mut normalized = EdmStringConstraints::new();

        if let Some(object) = constraints.and_then(Value::as_object) {
            if let Some(max_length) = object.get("maxLength") {
                let positive = max_length.as_f64().is_some_and(|n| n > 0.0);
                match json_length(max_length).filter(|_| positive) {
                    Some(n) => normalized.max_length = Some(n.max(1)),
                    _ => tracing::warn!(
                        type_name = Self::NAME,
                        "Illegal maxLength: {max_length}"
                    ),
                }
            }

            match object.get("nullable") {
                Some(Value::Bool(false)) => normalized.nullable = Some(false),
                Some(Value::Bool(true)) | None => {}
                Some(nullable) => {
                    tracing::warn!(type_name = Self::NAME, "Illegal nullable: {nullable}");
                }
            }
        }

        self.apply(normalized);
    }

    fn apply(&mut self, constraints: EdmStringConstraints) {
        self.base.set_constraints(StringConstraints {
            max_length: constraints.max_length,
            ..StringConstraints::default()
        });
        self.constraints = constraints;
    }
}
