//! Value → field type mapping.

use std::collections::{HashMap, HashSet};

use crate::ir::{FieldDefinition, FieldType, Primitive};
use crate::naming;
use crate::value::{JsonValue, Object};

/// Map a value to the field type it is generated as. `fallback` is the
/// field's source key; nested records are named after it.
pub fn resolve_type(value: &JsonValue, fallback: &str) -> FieldType {
    resolve_named(value, &naming::type_name(fallback))
}

/// `record` is the name a nested object at this position would take.
fn resolve_named(value: &JsonValue, record: &str) -> FieldType {
    match value {
        JsonValue::Null => FieldType::Primitive(Primitive::Any),
        JsonValue::String(_) => FieldType::Primitive(Primitive::String),
        JsonValue::Bool(_) => FieldType::Primitive(Primitive::Bool),
        JsonValue::Int(_) | JsonValue::Long(_) | JsonValue::Float(_) | JsonValue::Double(_) => {
            // num_kind is always Some for the numeric arms
            let kind = value.num_kind().map(Primitive::from).unwrap_or(Primitive::Any);
            FieldType::Primitive(kind)
        }
        JsonValue::Array(xs) => match xs.first() {
            None => FieldType::list_of(FieldType::Primitive(Primitive::Any)),
            Some(first) if first.is_object() => {
                FieldType::list_of(FieldType::RecordRef(record.to_string()))
            }
            Some(first) => FieldType::list_of(resolve_named(first, &format!("{record}Item"))),
        },
        JsonValue::Object(_) => FieldType::RecordRef(record.to_string()),
    }
}

/// Resolve every field of `object` in source order.
///
/// `bindings` maps a source key to the record name the collector actually
/// assigned, which differs from the derived name when a collision was
/// qualified. Names whose accessors would clash inside one record (`a-b` and
/// `a_b`, or `name` and `Name`) get a numeric suffix.
pub fn resolve_fields(object: &Object, bindings: &HashMap<String, String>) -> Vec<FieldDefinition> {
    // `getClass()` is final on java.lang.Object
    let mut taken = HashSet::from(["Class".to_string()]);
    let mut out = Vec::with_capacity(object.len());
    for (key, value) in object {
        let mut ty = resolve_type(value, key);
        if let Some(bound) = bindings.get(key) {
            ty = ty.with_record_name(bound);
        }
        let field_name = unique_name(naming::field_name(key), &mut taken);
        out.push(FieldDefinition { source_key: key.clone(), field_name, ty });
    }
    out
}

/// `taken` holds accessor stems (`capitalize(name)`); distinct stems mean
/// distinct fields, getters and setters.
fn unique_name(base: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(naming::capitalize(&base)) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}{n}");
        if taken.insert(naming::capitalize(&candidate)) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DecimalKind;
    use serde_json::json;

    fn v(x: serde_json::Value) -> JsonValue { JsonValue::from_serde(&x, DecimalKind::Double) }

    fn prim(p: Primitive) -> FieldType { FieldType::Primitive(p) }

    #[test]
    fn scalars_map_to_primitives() {
        assert_eq!(resolve_type(&v(json!(null)), "x"), prim(Primitive::Any));
        assert_eq!(resolve_type(&v(json!("s")), "x"), prim(Primitive::String));
        assert_eq!(resolve_type(&v(json!(false)), "x"), prim(Primitive::Bool));
        assert_eq!(resolve_type(&v(json!(7)), "x"), prim(Primitive::Int));
        assert_eq!(resolve_type(&v(json!(7_000_000_000i64)), "x"), prim(Primitive::Long));
        assert_eq!(resolve_type(&v(json!(0.5)), "x"), prim(Primitive::Double));
    }

    #[test]
    fn arrays_use_the_first_element() {
        assert_eq!(
            resolve_type(&v(json!([])), "tags"),
            FieldType::list_of(prim(Primitive::Any))
        );
        assert_eq!(
            resolve_type(&v(json!(["a", 1])), "tags"),
            FieldType::list_of(prim(Primitive::String))
        );
        assert_eq!(
            resolve_type(&v(json!([{"id": 1}, "stray"])), "items"),
            FieldType::list_of(FieldType::RecordRef("Items".into()))
        );
    }

    #[test]
    fn nested_arrays_name_records_with_item_suffix() {
        assert_eq!(
            resolve_type(&v(json!([[{"x": 1}]])), "grid"),
            FieldType::list_of(FieldType::list_of(FieldType::RecordRef("GridItem".into())))
        );
    }

    #[test]
    fn objects_are_record_refs_named_after_the_key() {
        assert_eq!(
            resolve_type(&v(json!({"city": "NY"})), "address"),
            FieldType::RecordRef("Address".into())
        );
    }

    #[test]
    fn resolve_fields_applies_bindings_and_dedupes_names() {
        let obj = v(json!({"x": {"k": 1}, "a-b": 1, "a_b": 2, "class": "c"}));
        let bindings = HashMap::from([("x".to_string(), "BX".to_string())]);
        let fields = resolve_fields(obj.as_object().unwrap(), &bindings);
        let names: Vec<&str> = fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, ["x", "a_b", "a_b2", "_class"]);
        assert_eq!(fields[0].ty, FieldType::RecordRef("BX".into()));
    }

    #[test]
    fn resolve_fields_keeps_accessor_names_distinct() {
        let obj = v(json!({"name": "a", "Name": "b", "a": true, "A": false, "Class": "c"}));
        let fields = resolve_fields(obj.as_object().unwrap(), &HashMap::new());
        let names: Vec<&str> = fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, ["name", "Name2", "a", "A2", "Class2"]);
    }

    #[test]
    fn escaped_record_names_carry_through_nested_arrays() {
        assert_eq!(
            resolve_type(&v(json!([[{"x": 1}]])), "list"),
            FieldType::list_of(FieldType::list_of(FieldType::RecordRef("_ListItem".into())))
        );
    }
}
