//! Structural description of a function parameter.
//!
//! This is what the parameter-introspection layer hands to binding providers.
//! Providers match on the shape only; nothing here is inspected at runtime
//! beyond these fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type tag of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Text,
    Bytes,
    Stream,
    Json,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueType::Text => "text",
            ValueType::Bytes => "bytes",
            ValueType::Stream => "stream",
            ValueType::Json => "json",
        };
        f.write_str(s)
    }
}

/// A parameter as declared on the function being invoked.
///
/// `is_out` marks a by-reference, assign-once output parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub value_type: ValueType,
    #[serde(default)]
    pub is_out: bool,
}

impl ParameterDescriptor {
    pub fn input(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            is_out: false,
        }
    }

    pub fn out(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            is_out: true,
        }
    }

    /// `out` パラメータかつ text 型か
    pub fn is_out_text(&self) -> bool {
        self.is_out && self.value_type == ValueType::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_text_shape() {
        assert!(ParameterDescriptor::out("result", ValueType::Text).is_out_text());
        assert!(!ParameterDescriptor::input("result", ValueType::Text).is_out_text());
        assert!(!ParameterDescriptor::out("result", ValueType::Bytes).is_out_text());
    }

    #[test]
    fn is_out_defaults_to_false_when_missing() {
        let p: ParameterDescriptor =
            serde_json::from_str(r#"{"name":"x","value_type":"text"}"#).unwrap();
        assert!(!p.is_out);
    }
}
