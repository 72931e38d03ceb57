//! Attribute values stored on nodes and edges.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute map attached to a node or an edge, keyed by attribute name.
pub type Attrs = BTreeMap<String, AttrValue>;

/// A single node or edge attribute.
///
/// Model state keys hold `Int` (discrete states, countdowns) or `Float`
/// (DeGroot opinions, thresholds, weights); coordinates (`pos`, `layout`) are
/// stored as `Point`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Two dimensional coordinate.
    Point([f64; 2]),
    /// Free-form text.
    Text(String),
}

impl AttrValue {
    /// Numeric view of the value; booleans map to `0.0`/`1.0`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(value) => Some(*value as f64),
            AttrValue::Float(value) => Some(*value),
            AttrValue::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            AttrValue::Point(_) | AttrValue::Text(_) => None,
        }
    }

    /// Integer view of the value; floats are accepted only when integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Int(value) => Some(*value),
            AttrValue::Float(value) if value.fract() == 0.0 && value.is_finite() => {
                Some(*value as i64)
            }
            AttrValue::Bool(flag) => Some(i64::from(*flag)),
            _ => None,
        }
    }

    /// Coordinate view of the value.
    pub fn as_point(&self) -> Option<[f64; 2]> {
        match self {
            AttrValue::Point(point) => Some(*point),
            _ => None,
        }
    }

    /// Short type label used in error context.
    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "bool",
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
            AttrValue::Point(_) => "point",
            AttrValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(flag) => write!(f, "{flag}"),
            AttrValue::Int(value) => write!(f, "{value}"),
            AttrValue::Float(value) => write!(f, "{value}"),
            AttrValue::Point([x, y]) => write!(f, "({x}, {y})"),
            AttrValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<[f64; 2]> for AttrValue {
    fn from(value: [f64; 2]) -> Self {
        AttrValue::Point(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}
