//! The value model shared by instances and schemas.
//!
//! Instances and schemas are both trees of [`Value`]. A schema is simply a
//! [`Value::Mapping`] whose keys are keyword names, so the two never need
//! separate parsers.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Category;

/// Mapping from text keys to values.
///
/// A `BTreeMap` keeps iteration lexicographic, which is also the keyword
/// evaluation order of the validator.
pub type Map = BTreeMap<String, Value>;

/// A schema object: keyword name to keyword value.
pub type Schema = Map;

/// A JSON-like value.
///
/// Integers and floats are distinct variants and booleans are never numbers,
/// so type checks are plain pattern matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Sequence(Vec<Value>),
    Mapping(Map),
}

impl Value {
    /// The runtime category of this value.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::Null => Category::Null,
            Self::Bool(_) => Category::Boolean,
            Self::Int(_) => Category::Integer,
            Self::Float(_) => Category::Float,
            Self::Text(_) => Category::Text,
            Self::Sequence(_) => Category::Sequence,
            Self::Mapping(_) => Category::Mapping,
        }
    }

    /// Borrow this value as a schema object, if it is a mapping.
    #[must_use]
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Convert this value into a schema object, if it is a mapping.
    #[must_use]
    pub fn into_schema(self) -> Option<Schema> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }
}

/// Structural equality, with numbers compared by value across `Int` and
/// `Float` (`1 == 1.0`). A boolean never equals a number.
impl PartialEq for Value {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(i), Self::Float(f)) | (Self::Float(f), Self::Int(i)) => {
                compare_int_float(*i, *f) == Some(Ordering::Equal)
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            (Self::Mapping(a), Self::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

/// Exact ordering of an integer against a float, without rounding the
/// integer to `f64`. `None` when `f` is NaN.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn compare_int_float(i: i64, f: f64) -> Option<Ordering> {
    // -2^63 is exact as f64; every float in [-2^63, 2^63) truncates into i64.
    let lower = i64::MIN as f64;
    if f.is_nan() {
        return None;
    }
    if f >= -lower {
        return Some(Ordering::Less);
    }
    if f < lower {
        return Some(Ordering::Greater);
    }

    let whole = f.trunc();
    let ordering = i.cmp(&(whole as i64));
    if ordering != Ordering::Equal {
        return Some(ordering);
    }
    // Same integer part: the fractional part decides.
    whole.partial_cmp(&f)
}

/// Renders compact JSON text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::from(self))
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Int(i) => Self::from(*i),
            // Non-finite floats have no JSON spelling.
            Value::Float(f) => serde_json::Number::from_f64(*f).map_or(Self::Null, Self::Number),
            Value::Text(s) => Self::String(s.clone()),
            Value::Sequence(items) => Self::Array(items.iter().map(Self::from).collect()),
            Value::Mapping(map) => {
                Self::Object(map.iter().map(|(k, v)| (k.clone(), Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Sequence(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Self::Mapping(value)
    }
}
