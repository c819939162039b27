//! Typed Values
//!
//! `Value` is a closed sum type over every kind of value a key can hold.
//! Values are immutable once built and shared as [`NValue`] (`Arc<Value>`).
//!
//! ## Rendering
//!
//! A value can be rendered as one flat, delimiter-joined fragment that is
//! appended to a command as trailing arguments:
//!
//! | Variant | Example rendering |
//! |---------|-------------------|
//! | String  | `hello` |
//! | Integer | `42` |
//! | Array   | `a b c` |
//! | ZSet    | `1.5 alice 2 bob` (score, member) |
//! | Hash    | `field1 v1 field2 v2` |
//! | Null    | *(empty)* |

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A shared, immutable value.
pub type NValue = Arc<Value>;

/// The tag of a [`Value`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    Null,
    Boolean,
    Integer,
    UInteger,
    Float,
    String,
    Array,
    Set,
    ZSet,
    Hash,
}

impl ValueType {
    /// Returns the lower-case name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::UInteger => "uinteger",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Set => "set",
            ValueType::ZSet => "zset",
            ValueType::Hash => "hash",
        }
    }

    /// Parses a type name, accepting a few common aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let ty = match name.to_ascii_lowercase().as_str() {
            "null" | "none" => ValueType::Null,
            "boolean" | "bool" => ValueType::Boolean,
            "integer" | "int" => ValueType::Integer,
            "uinteger" | "uint" => ValueType::UInteger,
            "float" | "double" => ValueType::Float,
            "string" | "str" => ValueType::String,
            "array" | "list" => ValueType::Array,
            "set" => ValueType::Set,
            "zset" | "sortedset" => ValueType::ZSet,
            "hash" | "map" => ValueType::Hash,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed value stored under a key.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value
    Null,
    Boolean(bool),
    Integer(i64),
    UInteger(u64),
    Float(f64),
    String(String),
    /// Ordered list of members
    Array(Vec<String>),
    /// Unique members, insertion order kept
    Set(Vec<String>),
    /// Members with scores, as (member, score)
    ZSet(Vec<(String, f64)>),
    /// Fields with values, as (field, value)
    Hash(Vec<(String, String)>),
}

impl Value {
    /// Creates a string value.
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Creates an array value.
    pub fn array<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Creates a set value; repeated members are kept once.
    pub fn set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut members: Vec<String> = Vec::new();
        for item in items {
            let item: String = item.into();
            if seen.insert(item.clone()) {
                members.push(item);
            }
        }
        Value::Set(members)
    }

    /// Creates an ordered-set value from (member, score) pairs.
    pub fn zset<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Value::ZSet(items.into_iter().map(|(m, s)| (m.into(), s)).collect())
    }

    /// Creates a hash value from (field, value) pairs.
    pub fn hash<I, F, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (F, V)>,
        F: Into<String>,
        V: Into<String>,
    {
        Value::Hash(
            items
                .into_iter()
                .map(|(f, v)| (f.into(), v.into()))
                .collect(),
        )
    }

    /// Returns the variant tag.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::UInteger(_) => ValueType::UInteger,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Set(_) => ValueType::Set,
            Value::ZSet(_) => ValueType::ZSet,
            Value::Hash(_) => ValueType::Hash,
        }
    }

    /// Returns true if this is the null variant.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Renders the value as one flat fragment joined by `delimiter`.
    pub fn render(&self, delimiter: &str) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::UInteger(n) => n.to_string(),
            Value::Float(x) => x.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(items) | Value::Set(items) => items.join(delimiter),
            Value::ZSet(items) => {
                let mut parts = Vec::with_capacity(items.len() * 2);
                for (member, score) in items {
                    parts.push(score.to_string());
                    parts.push(member.clone());
                }
                parts.join(delimiter)
            }
            Value::Hash(items) => {
                let mut parts = Vec::with_capacity(items.len() * 2);
                for (field, value) in items {
                    parts.push(field.clone());
                    parts.push(value.clone());
                }
                parts.join(delimiter)
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(super::DEFAULT_DELIMITER))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
