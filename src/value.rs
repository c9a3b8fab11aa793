//! Typed JSON value model.
//!
//! `serde_json` does the parsing; this module re-tags its output so every
//! number carries the kind it will be generated as. Object keys keep their
//! source order (`preserve_order`), which drives field order downstream.
pub mod num;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

pub use num::{DecimalKind, NumKind};

use crate::error::GenError;

pub type Object = IndexMap<String, JsonValue>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(OrderedFloat<f32>),
    Double(OrderedFloat<f64>),
    String(String),
    Array(Vec<JsonValue>),
    Object(Object),
}

/// Parse JSON text. Malformed input fails before anything else happens.
pub fn parse(text: &str, decimal: DecimalKind) -> Result<JsonValue, GenError> {
    let raw = crate::path_de::parse_document(text)?;
    Ok(JsonValue::from_serde(&raw, decimal))
}

impl JsonValue {
    pub fn from_serde(v: &serde_json::Value, decimal: DecimalKind) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => num::classify(n, decimal),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Array(xs) => JsonValue::Array(
                xs.iter().map(|x| JsonValue::from_serde(x, decimal)).collect()
            ),
            Value::Object(m) => JsonValue::Object(
                m.iter()
                    .map(|(k, x)| (k.clone(), JsonValue::from_serde(x, decimal)))
                    .collect()
            ),
        }
    }

    pub fn num_kind(&self) -> Option<NumKind> {
        match self {
            JsonValue::Int(_) => Some(NumKind::Int),
            JsonValue::Long(_) => Some(NumKind::Long),
            JsonValue::Float(_) => Some(NumKind::Float),
            JsonValue::Double(_) => Some(NumKind::Double),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            JsonValue::Object(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(xs) => Some(xs),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool { matches!(self, JsonValue::Object(_)) }

    /// Short kind label used in shape fingerprints and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "bool",
            JsonValue::Int(_) => "int",
            JsonValue::Long(_) => "long",
            JsonValue::Float(_) => "float",
            JsonValue::Double(_) => "double",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }
}
