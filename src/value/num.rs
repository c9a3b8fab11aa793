use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use super::JsonValue;

/// How literals with a fraction or exponent are typed. JSON text carries no
/// float/double distinction, so the choice is explicit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecimalKind {
    Float,
    #[default]
    Double,
}

/// Numeric kind of a literal, fixed once at parse time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumKind {
    Int,
    Long,
    Float,
    Double,
}

/// Classify a parsed number.
///
/// Precedence: fits i32 → `Int`; other integral i64/u64 → `Long`;
/// everything else (fractions, exponents, integers beyond u64) → decimal.
pub(super) fn classify(n: &serde_json::Number, decimal: DecimalKind) -> JsonValue {
    if let Some(i) = n.as_i64() {
        return match i32::try_from(i) {
            Ok(small) => JsonValue::Int(small),
            Err(_) => JsonValue::Long(i),
        };
    }
    if let Some(u) = n.as_u64() {
        // above i64::MAX; only the kind survives
        return JsonValue::Long(i64::try_from(u).unwrap_or(i64::MAX));
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    match decimal {
        DecimalKind::Double => JsonValue::Double(OrderedFloat(f)),
        DecimalKind::Float => JsonValue::Float(OrderedFloat(f as f32)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kind(v: serde_json::Value, decimal: DecimalKind) -> Option<NumKind> {
        let serde_json::Value::Number(n) = v else { panic!("not a number") };
        classify(&n, decimal).num_kind()
    }

    #[test]
    fn int_range_boundaries() {
        assert_eq!(kind(json!(0), DecimalKind::Double), Some(NumKind::Int));
        assert_eq!(kind(json!(i32::MAX), DecimalKind::Double), Some(NumKind::Int));
        assert_eq!(kind(json!(i32::MIN), DecimalKind::Double), Some(NumKind::Int));
        assert_eq!(kind(json!(i32::MAX as i64 + 1), DecimalKind::Double), Some(NumKind::Long));
        assert_eq!(kind(json!(i32::MIN as i64 - 1), DecimalKind::Double), Some(NumKind::Long));
        assert_eq!(kind(json!(u64::MAX), DecimalKind::Double), Some(NumKind::Long));
    }

    #[test]
    fn decimals_follow_the_configured_kind() {
        assert_eq!(kind(json!(1.5), DecimalKind::Double), Some(NumKind::Double));
        assert_eq!(kind(json!(1.5), DecimalKind::Float), Some(NumKind::Float));
    }
}
