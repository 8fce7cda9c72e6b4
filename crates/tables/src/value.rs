//! Typed argument values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A value bound to a command parameter.
///
/// Deserializes untagged from JSON, so catalogue defaults and call arguments
/// can be read from files: `null`, booleans, integers, floats, strings,
/// arrays and objects map to the variants in that order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// No value.
    #[default]
    Null,
    /// Boolean flag, written as `1` / `0`.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Sequence of values (range parameters, blocks, passthrough lists).
    List(Vec<ArgValue>),
    /// Keyed structure. Never renderable; present so that type errors can
    /// name what the caller actually passed.
    Table(BTreeMap<String, ArgValue>),
}

impl ArgValue {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ArgValue::Null => "null",
            ArgValue::Bool(_) => "bool",
            ArgValue::Int(_) => "int",
            ArgValue::Float(_) => "float",
            ArgValue::Str(_) => "string",
            ArgValue::List(_) => "list",
            ArgValue::Table(_) => "table",
        }
    }

    /// `true` for booleans, numbers and strings.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            ArgValue::Bool(_) | ArgValue::Int(_) | ArgValue::Float(_) | ArgValue::Str(_)
        )
    }

    /// `true` for integers and floats.
    pub fn is_number(&self) -> bool {
        matches!(self, ArgValue::Int(_) | ArgValue::Float(_))
    }

    /// Render a scalar as it appears in a command string.
    ///
    /// Returns `None` for `Null`, `List` and `Table`.
    pub fn render(&self) -> Option<String> {
        match self {
            ArgValue::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            ArgValue::Int(i) => Some(i.to_string()),
            ArgValue::Float(f) => Some(f.to_string()),
            ArgValue::Str(s) => Some(s.clone()),
            ArgValue::Null | ArgValue::List(_) | ArgValue::Table(_) => None,
        }
    }

    /// Interpret a command-line literal.
    ///
    /// Anything that parses as JSON (numbers, `true`, `[..]`, quoted strings)
    /// takes its JSON type; everything else is kept as plain text, so
    /// `ORE` and `"ORE"` both give a string.
    pub fn from_literal(text: &str) -> ArgValue {
        serde_json::from_str(text).unwrap_or_else(|_| ArgValue::Str(text.to_string()))
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

impl From<i64> for ArgValue {
    fn from(i: i64) -> Self {
        ArgValue::Int(i)
    }
}

impl From<i32> for ArgValue {
    fn from(i: i32) -> Self {
        ArgValue::Int(i64::from(i))
    }
}

impl From<f64> for ArgValue {
    fn from(f: f64) -> Self {
        ArgValue::Float(f)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(v: Vec<T>) -> Self {
        ArgValue::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_scalars() {
        assert_eq!(ArgValue::from("ORE").render().as_deref(), Some("ORE"));
        assert_eq!(ArgValue::from(5).render().as_deref(), Some("5"));
        assert_eq!(ArgValue::from(2.5).render().as_deref(), Some("2.5"));
        assert_eq!(ArgValue::from(true).render().as_deref(), Some("1"));
        assert_eq!(ArgValue::Null.render(), None);
        assert_eq!(ArgValue::from(vec!["a"]).render(), None);
    }

    #[test]
    fn deserialize_untagged() {
        let v: Vec<ArgValue> =
            serde_json::from_str(r#"[null, true, 3, 1.5, "AU", ["X", "Y"], {"a": 1}]"#).unwrap();
        let kinds: Vec<&str> = v.iter().map(ArgValue::kind).collect();
        assert_eq!(
            kinds,
            ["null", "bool", "int", "float", "string", "list", "table"]
        );
    }

    #[test]
    fn literal_parsing() {
        assert_eq!(ArgValue::from_literal("ORE"), ArgValue::from("ORE"));
        assert_eq!(ArgValue::from_literal("\"5\""), ArgValue::from("5"));
        assert_eq!(ArgValue::from_literal("5"), ArgValue::Int(5));
        assert_eq!(ArgValue::from_literal("0.25"), ArgValue::Float(0.25));
        assert_eq!(
            ArgValue::from_literal(r#"["AU","CU"]"#),
            ArgValue::from(vec!["AU", "CU"])
        );
    }
}
