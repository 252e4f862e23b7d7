use crate::error::UnsupportedType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The primitive representation a value is converted to or from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Int,
    Float,
    Boolean,
    Any,
}

impl PrimitiveType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Any => "any",
        }
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimitiveType {
    type Err = UnsupportedType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "boolean" => Ok(Self::Boolean),
            "any" => Ok(Self::Any),
            _ => Err(UnsupportedType(s.to_string())),
        }
    }
}

/// A value in one of the primitive representations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelValue {
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ModelValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModelValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ModelValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ModelValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ModelValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for ModelValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for ModelValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}
