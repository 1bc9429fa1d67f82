//! Typed property values and their form bindings.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while reading or writing block properties
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    #[error("Unknown property '{key}' for {block} block")]
    UnknownKey { block: String, key: String },

    #[error("Property '{key}' expects a {expected} value")]
    TypeMismatch { key: String, expected: PropKind },

    #[error("Unknown input type: {0}")]
    UnknownKind(String),

    #[error("Cannot read '{raw}' as {kind}")]
    InvalidInput { kind: PropKind, raw: String },

    #[error("Invalid properties: {0}")]
    Decode(String),
}

/// Value type a form input binds to (its `data-type` attribute)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropKind {
    String,
    Int,
    Boolean,
}

impl PropKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropKind::String => "string",
            PropKind::Int => "int",
            PropKind::Boolean => "boolean",
        }
    }

    pub fn parse(name: &str) -> Result<Self, PropertyError> {
        match name {
            "string" => Ok(PropKind::String),
            "int" => Ok(PropKind::Int),
            "boolean" => Ok(PropKind::Boolean),
            other => Err(PropertyError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for PropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single property value written by the properties panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl PropValue {
    /// Coerce a raw form value according to the input's declared type.
    ///
    /// Checkbox inputs report `"true"`/`"on"` when checked.
    pub fn from_input(kind: PropKind, raw: &str) -> Result<Self, PropertyError> {
        match kind {
            PropKind::String => Ok(PropValue::Str(raw.to_string())),
            PropKind::Int => raw
                .trim()
                .parse::<i64>()
                .map(PropValue::Int)
                .map_err(|_| PropertyError::InvalidInput {
                    kind,
                    raw: raw.to_string(),
                }),
            PropKind::Boolean => match raw.trim() {
                "true" | "on" | "1" => Ok(PropValue::Bool(true)),
                "false" | "off" | "0" | "" => Ok(PropValue::Bool(false)),
                _ => Err(PropertyError::InvalidInput {
                    kind,
                    raw: raw.to_string(),
                }),
            },
        }
    }

    pub fn kind(&self) -> PropKind {
        match self {
            PropValue::Bool(_) => PropKind::Boolean,
            PropValue::Int(_) => PropKind::Int,
            PropValue::Str(_) => PropKind::String,
        }
    }

    pub fn into_string(self, key: &str) -> Result<String, PropertyError> {
        match self {
            PropValue::Str(s) => Ok(s),
            _ => Err(mismatch(key, PropKind::String)),
        }
    }

    pub fn into_int(self, key: &str) -> Result<i64, PropertyError> {
        match self {
            PropValue::Int(n) => Ok(n),
            // Select boxes post their value as text
            PropValue::Str(s) => s.trim().parse().map_err(|_| mismatch(key, PropKind::Int)),
            PropValue::Bool(_) => Err(mismatch(key, PropKind::Int)),
        }
    }

    pub fn into_bool(self, key: &str) -> Result<bool, PropertyError> {
        match self {
            PropValue::Bool(b) => Ok(b),
            _ => Err(mismatch(key, PropKind::Boolean)),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Str(s)
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        PropValue::Int(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

fn mismatch(key: &str, expected: PropKind) -> PropertyError {
    PropertyError::TypeMismatch {
        key: key.to_string(),
        expected,
    }
}
