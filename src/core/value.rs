//! Value ordering for rudb
//!
//! Documents are plain `serde_json::Value`s. This module gives them the
//! total order used for sorting, the equality used by `where` filters,
//! and the byte keys used by field indexes.

use std::cmp::Ordering;
use serde_json::{Number, Value};

/// Get a string representation of the value's type
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Rank of a value's type in the cross-type order
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }

    // serde_json numbers are finite, so only -0.0 vs 0.0 needs care and
    // partial_cmp already treats them as equal
    let x = a.as_f64().unwrap_or(f64::NAN);
    let y = b.as_f64().unwrap_or(f64::NAN);
    x.partial_cmp(&y).unwrap_or_else(|| x.total_cmp(&y))
}

/// Canonical text of a number: integral values print without a fraction
///
/// Numbers that compare equal share the same text, so `1`, `1.0` and `-0.0`
/// render as `1`, `1` and `0`.
pub fn canonical_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }

    let f = n.as_f64().unwrap_or(0.0);
    if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

/// Compare two values under the store's total order
///
/// null < boolean < number < string < array < object. Numbers compare by
/// magnitude regardless of representation.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(xs), Value::Array(ys)) => {
            for (x, y) in xs.iter().zip(ys.iter()) {
                let ord = compare_values(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            xs.len().cmp(&ys.len())
        }
        (Value::Object(xs), Value::Object(ys)) => {
            // serde_json keeps object keys sorted, so entries line up
            for ((kx, vx), (ky, vy)) in xs.iter().zip(ys.iter()) {
                let ord = kx.cmp(ky).then_with(|| compare_values(vx, vy));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            xs.len().cmp(&ys.len())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Check two values for equality (`1` equals `1.0`)
pub fn values_equal(a: &Value, b: &Value) -> bool {
    compare_values(a, b) == Ordering::Equal
}

/// Create an index key from a scalar value
///
/// Returns `None` for arrays and objects, which are not indexed. Values that
/// compare equal always produce the same key.
pub fn index_key(value: &Value) -> Option<Vec<u8>> {
    let mut key_bytes = Vec::new();

    match value {
        Value::Null => {
            key_bytes.push(0x00);
        },
        Value::Bool(b) => {
            key_bytes.push(0x01);
            key_bytes.push(u8::from(*b));
        },
        Value::Number(n) => {
            key_bytes.push(0x02);
            let f = n.as_f64()?;
            // -0.0 and 0.0 compare equal, so they must share a key
            let f = if f == 0.0 { 0.0 } else { f };
            let bits = f.to_bits();
            let ordered = if f.is_sign_negative() { !bits } else { bits ^ (1 << 63) };
            key_bytes.extend_from_slice(&ordered.to_be_bytes());
        },
        Value::String(s) => {
            key_bytes.push(0x03);
            key_bytes.extend_from_slice(s.as_bytes());
        },
        Value::Array(_) | Value::Object(_) => return None,
    }

    Some(key_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cross_type_order() {
        let ordered = [
            json!(null),
            json!(false),
            json!(true),
            json!(-3),
            json!(2.5),
            json!(10),
            json!("10"),
            json!("9"),
            json!([1]),
            json!({"a": 1}),
        ];

        for pair in ordered.windows(2) {
            assert_eq!(compare_values(&pair[0], &pair[1]), Ordering::Less, "{:?}", pair);
        }
    }

    #[test]
    fn test_numbers_compare_by_magnitude() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert_eq!(compare_values(&json!(9), &json!(10)), Ordering::Less);
        assert_eq!(compare_values(&json!(u64::MAX), &json!(-1)), Ordering::Greater);
    }

    #[test]
    fn test_signed_zero_is_zero() {
        assert!(values_equal(&json!(-0.0), &json!(0.0)));
        assert!(values_equal(&json!(-0.0), &json!(0)));
        assert_eq!(compare_values(&json!(-0.5), &json!(-0.0)), Ordering::Less);
    }

    #[test]
    fn test_canonical_number() {
        let text = |v: Value| canonical_number(v.as_number().unwrap());
        assert_eq!(text(json!(1)), "1");
        assert_eq!(text(json!(1.0)), "1");
        assert_eq!(text(json!(-0.0)), "0");
        assert_eq!(text(json!(-3.0)), "-3");
        assert_eq!(text(json!(2.5)), "2.5");
        assert_eq!(text(json!(u64::MAX)), u64::MAX.to_string());
    }

    #[test]
    fn test_composite_equality() {
        assert!(values_equal(&json!([1, "a"]), &json!([1.0, "a"])));
        assert!(values_equal(&json!({"x": 1, "y": 2}), &json!({"y": 2, "x": 1})));
        assert!(!values_equal(&json!({"x": 1}), &json!({"x": 1, "y": 2})));
    }

    #[test]
    fn test_index_keys() {
        assert_eq!(index_key(&json!(1)), index_key(&json!(1.0)));
        assert_eq!(index_key(&json!(0.0)), index_key(&json!(-0.0)));
        assert_ne!(index_key(&json!("1")), index_key(&json!(1)));
        assert!(index_key(&json!([1])).is_none());
        assert!(index_key(&json!({"a": 1})).is_none());

        // Order of number keys follows numeric order
        let neg = index_key(&json!(-5)).unwrap();
        let small = index_key(&json!(2)).unwrap();
        let big = index_key(&json!(300)).unwrap();
        assert!(neg < small && small < big);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!(4)), "number");
        assert_eq!(type_name(&json!({})), "object");
    }
}
