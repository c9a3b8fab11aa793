use crate::value::{JsonValue, Object};

/// Canonical shape text: value kinds and keys in source order, arrays by
/// their first element. Two objects with equal fingerprints generate the
/// same record.
pub fn fingerprint(v: &JsonValue) -> String {
    let mut out = String::new();
    write_shape(v, &mut out);
    out
}

pub fn fingerprint_object(m: &Object) -> String {
    let mut out = String::new();
    write_object(m, &mut out);
    out
}

fn write_shape(v: &JsonValue, out: &mut String) {
    match v {
        JsonValue::Array(xs) => {
            out.push('[');
            if let Some(first) = xs.first() {
                write_shape(first, out);
            }
            out.push(']');
        }
        JsonValue::Object(m) => write_object(m, out),
        scalar => out.push_str(scalar.kind_name()),
    }
}

fn write_object(m: &Object, out: &mut String) {
    out.push('{');
    for (i, (k, x)) in m.iter().enumerate() {
        if i > 0 { out.push(','); }
        // keys are quoted so `:` and `,` inside them stay unambiguous
        out.push_str(&serde_json::to_string(k).unwrap_or_default());
        out.push(':');
        write_shape(x, out);
    }
    out.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DecimalKind;
    use serde_json::json;

    fn fp(x: serde_json::Value) -> String {
        fingerprint(&JsonValue::from_serde(&x, DecimalKind::Double))
    }

    #[test]
    fn values_do_not_matter_only_kinds() {
        assert_eq!(fp(json!({"k": 1})), fp(json!({"k": 2})));
        assert_ne!(fp(json!({"k": 1})), fp(json!({"k": "s"})));
    }

    #[test]
    fn key_order_is_part_of_the_shape() {
        assert_ne!(fp(json!({"a": 1, "b": 1})), fp(json!({"b": 1, "a": 1})));
    }

    #[test]
    fn arrays_are_described_by_their_first_element() {
        assert_eq!(fp(json!([1, "x"])), "[int]");
        assert_eq!(fp(json!([])), "[]");
        assert_eq!(fp(json!({"a": [{"b": null}]})), r#"{"a":[{"b":null}]}"#);
    }
}
