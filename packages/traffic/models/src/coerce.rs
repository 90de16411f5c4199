//! Lenient field decoding for raw count rows.
//!
//! Source rows are loosely typed: counts show up as numbers, numeric
//! strings, empty strings, `null`, or not at all. Anything that is not a
//! finite number decodes to zero, and so does a negative count.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerces a JSON value to a finite number, defaulting to `0.0`.
#[must_use]
pub fn number_or_zero(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    };

    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Coerces a JSON value to a vehicle count. Negative values are invalid
/// and become `0.0`.
#[must_use]
pub fn count_or_zero(value: &Value) -> f64 {
    number_or_zero(value).max(0.0)
}

/// `deserialize_with` adapter for [`count_or_zero`].
pub fn count<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_or_zero(&value))
}

/// `deserialize_with` adapter for [`number_or_zero`], used for coordinates.
pub fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_or_zero(&value))
}

/// Decodes a descriptive field. Scalars are stringified, `null` and
/// structured values become `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_pass_through() {
        assert!((number_or_zero(&json!(42)) - 42.0).abs() < f64::EPSILON);
        assert!((number_or_zero(&json!(-3.819_44)) - -3.819_44).abs() < f64::EPSILON);
    }

    #[test]
    fn numeric_strings_are_parsed() {
        assert!((number_or_zero(&json!("150")) - 150.0).abs() < f64::EPSILON);
        assert!((number_or_zero(&json!(" 12.5 ")) - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn garbage_becomes_zero() {
        for value in [
            json!(null),
            json!(""),
            json!("n/a"),
            json!("NaN"),
            json!("inf"),
            json!(true),
            json!([1, 2]),
            json!({ "count": 1 }),
        ] {
            assert!(
                number_or_zero(&value).abs() < f64::EPSILON,
                "{value} should coerce to zero"
            );
        }
    }

    #[test]
    fn negative_counts_become_zero() {
        for value in [json!(-10), json!("-5"), json!(" -0.5 ")] {
            assert!(
                count_or_zero(&value).abs() < f64::EPSILON,
                "{value} should coerce to zero"
            );
        }
        assert!((count_or_zero(&json!("150")) - 150.0).abs() < f64::EPSILON);
        assert!((number_or_zero(&json!("-5")) - -5.0).abs() < f64::EPSILON);
    }
}
