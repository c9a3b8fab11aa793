// Typed IR shared by the resolver, the collector, and codegen. No JSON values here.

use serde::Serialize;

use crate::value::NumKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Any,                     // null or unknown element type
    Bool,
    Int,
    Long,
    Float,
    Double,
    String,
}

impl From<NumKind> for Primitive {
    fn from(kind: NumKind) -> Self {
        match kind {
            NumKind::Int => Primitive::Int,
            NumKind::Long => Primitive::Long,
            NumKind::Float => Primitive::Float,
            NumKind::Double => Primitive::Double,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Primitive(Primitive),
    RecordRef(String),
    ListOf(Box<FieldType>),
}

impl FieldType {
    pub fn list_of(item: FieldType) -> Self { FieldType::ListOf(Box::new(item)) }

    pub fn is_list(&self) -> bool { matches!(self, FieldType::ListOf(_)) }

    pub fn is_boolean(&self) -> bool { matches!(self, FieldType::Primitive(Primitive::Bool)) }

    /// Name of the record this type refers to, at any list depth.
    pub fn record_name(&self) -> Option<&str> {
        match self {
            FieldType::Primitive(_) => None,
            FieldType::RecordRef(name) => Some(name),
            FieldType::ListOf(item) => item.record_name(),
        }
    }

    /// Same type with its record reference (if any) pointing at `name`.
    pub fn with_record_name(self, name: &str) -> Self {
        match self {
            FieldType::Primitive(p) => FieldType::Primitive(p),
            FieldType::RecordRef(_) => FieldType::RecordRef(name.to_string()),
            FieldType::ListOf(item) => FieldType::list_of(item.with_record_name(name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub source_key: String,
    pub field_name: String,  // sanitized, unique within the record
    pub ty: FieldType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDefinition {
    pub name: String,
    pub path: Vec<String>,   // field keys from the root object
    pub fields: Vec<FieldDefinition>,  // source order
}

impl RecordDefinition {
    pub fn has_list_field(&self) -> bool {
        self.fields.iter().any(|f| f.ty.is_list())
    }

    pub fn field(&self, source_key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.source_key == source_key)
    }
}
