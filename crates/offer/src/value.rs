//! Property values describing one listing.
//!
//! A listing arrives as an ordered [`PropertyMap`]. Values are an explicit
//! tagged union built by the caller, so the encoder never has to guess a
//! value's type at render time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from property name to value. Insertion order is output order.
pub type PropertyMap = IndexMap<String, PropertyValue>;

/// Any value a listing property can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Missing value; the property is omitted from the output entirely
    #[default]
    Null,
    /// Boolean value, rendered with the configured yes/no tokens
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value, rendered with fixed precision
    Float(f64),
    /// String value
    String(String),
    /// Sequence of values (element groups or handler input such as images)
    List(Vec<PropertyValue>),
    /// Nested record rendered as one element with child properties
    Map(PropertyMap),
}

/// The non-null leaf subset of [`PropertyValue`] handed to the formatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(&'a str),
}

impl PropertyValue {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Returns the scalar view of this value, or `None` for null, lists and maps.
    pub fn as_scalar(&self) -> Option<Scalar<'_>> {
        match self {
            PropertyValue::Bool(b) => Some(Scalar::Bool(*b)),
            PropertyValue::Int(i) => Some(Scalar::Int(*i)),
            PropertyValue::Float(f) => Some(Scalar::Float(*f)),
            PropertyValue::String(s) => Some(Scalar::String(s)),
            PropertyValue::Null | PropertyValue::List(_) | PropertyValue::Map(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&PropertyMap> {
        match self {
            PropertyValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the variant, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Null => "null",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Int(_) => "int",
            PropertyValue::Float(_) => "float",
            PropertyValue::String(_) => "string",
            PropertyValue::List(_) => "list",
            PropertyValue::Map(_) => "map",
        }
    }

    /// Converts a JSON value, keeping object key order.
    ///
    /// Whole JSON numbers become [`PropertyValue::Int`]; everything else that
    /// is numeric becomes [`PropertyValue::Float`]. Integers outside the `i64`
    /// range fall back to floats.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PropertyValue::Null,
            serde_json::Value::Bool(b) => PropertyValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => PropertyValue::Int(i),
                None => n
                    .as_f64()
                    .map(PropertyValue::Float)
                    .unwrap_or(PropertyValue::Null),
            },
            serde_json::Value::String(s) => PropertyValue::String(s),
            serde_json::Value::Array(items) => {
                PropertyValue::List(items.into_iter().map(PropertyValue::from_json).collect())
            }
            serde_json::Value::Object(map) => PropertyValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, PropertyValue::from_json(v)))
                    .collect(),
            ),
        }
    }
}

/// Converts a JSON object into a property map, keeping key order.
///
/// Returns `None` when the value is not an object.
pub fn property_map_from_json(value: serde_json::Value) -> Option<PropertyMap> {
    match PropertyValue::from_json(value) {
        PropertyValue::Map(map) => Some(map),
        _ => None,
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        PropertyValue::Int(v.into())
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<u32> for PropertyValue {
    fn from(v: u32) -> Self {
        PropertyValue::Int(v.into())
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

impl From<PropertyMap> for PropertyValue {
    fn from(v: PropertyMap) -> Self {
        PropertyValue::Map(v)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(v: Vec<T>) -> Self {
        PropertyValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(PropertyValue::Null)
    }
}
