//! Untyped setting values
//!
//! Elasticsearch reports index settings as a flat map of dotted keys to JSON
//! values whose shape is only known at runtime. [`SettingValue`] captures that
//! shape as a closed sum type so every coercion branch is an exhaustive match.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A setting value as reported by the cluster
///
/// Variant order matters for deserialization: serde tries each in turn, so a
/// JSON `true` becomes [`SettingValue::Bool`], `5` becomes [`SettingValue::Int`]
/// and anything outside string/bool/int/list lands in [`SettingValue::Other`].
///
/// # Examples
///
/// ```
/// use esindex::domain::SettingValue;
/// use serde_json::json;
///
/// assert_eq!(SettingValue::from(json!("1")), SettingValue::String("1".to_string()));
/// assert_eq!(SettingValue::from(json!(1)), SettingValue::Int(1));
/// assert_eq!(SettingValue::from(json!(1.5)).shape(), "number");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// JSON boolean
    Bool(bool),
    /// JSON integer that fits in an `i64`
    Int(i64),
    /// JSON string, including numbers the cluster serialized as strings
    String(String),
    /// JSON array
    List(Vec<SettingValue>),
    /// Floats, objects, nulls and out-of-range integers
    Other(serde_json::Value),
}

impl SettingValue {
    /// Name of the runtime shape, used in coercion errors
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Other(serde_json::Value::Null) => "null",
            Self::Other(serde_json::Value::Object(_)) => "object",
            Self::Other(_) => "number",
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<serde_json::Value> for SettingValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Other(serde_json::Value::Number(n)),
            },
            other => Self::Other(other),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl<T: Into<SettingValue>> From<Vec<T>> for SettingValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Dotted setting key to untyped value, as reported for one index
///
/// A `BTreeMap` keeps iteration and serialization order stable, which is what
/// makes the raw passthrough JSON byte-identical across reads.
pub type SettingsMap = BTreeMap<String, SettingValue>;

/// Declared semantic type of a typed settings field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    /// Scalar string
    String,
    /// Boolean
    Bool,
    /// 64-bit integer, accepted natively or as a base-10 string
    Int,
    /// Ordered list of strings
    OrderedList,
    /// Unordered set of strings
    UnorderedSet,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::OrderedList => "ordered list of string",
            Self::UnorderedSet => "unordered set of string",
        };
        f.write_str(name)
    }
}
