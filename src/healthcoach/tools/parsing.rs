//! Normalization of loosely-typed tool arguments.

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer};

/// Split a comma-separated field into trimmed, non-empty items, keeping order.
///
/// Blank segments anywhere in the list are dropped, so `"a, ,b"` gives `["a", "b"]`.
///
/// ```rust
/// use healthcoach::tools::split_list;
///
/// assert_eq!(split_list("vegetarian, gluten-free"), vec!["vegetarian", "gluten-free"]);
/// assert!(split_list("").is_empty());
/// assert!(split_list("  ,  ").is_empty());
/// ```
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Treat zero, negatives and missing values as "not provided".
pub fn positive_u32(value: Option<i64>) -> Option<u32> {
    value
        .filter(|v| *v > 0)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}

/// Treat zero, negatives, NaN and missing values as "not provided".
pub fn positive_f64(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Read a JSON number holding a whole value. Runtimes that pass arguments through
/// a protobuf `Struct` send every number as a double, so `45.0` must count as `45`.
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    if number.as_u64().is_some() {
        return Ok(i64::MAX);
    }
    match number.as_f64() {
        Some(value)
            if value.is_finite()
                && value.fract() == 0.0
                && value >= i64::MIN as f64
                && value <= i64::MAX as f64 =>
        {
            Ok(value as i64)
        }
        Some(value) => Err(D::Error::invalid_value(
            Unexpected::Float(value),
            &"a whole number",
        )),
        None => Err(D::Error::custom("expected a whole number")),
    }
}

/// `deserialize_with` helper for required counts such as minutes or millilitres.
///
/// Accepts `45` and `45.0`; rejects fractions and negatives.
pub fn whole_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = whole_number(deserializer)?;
    u32::try_from(value).map_err(|_| {
        D::Error::invalid_value(Unexpected::Signed(value), &"a non-negative whole number")
    })
}

/// `deserialize_with` helper for optional whole numbers; `null` becomes `None`.
///
/// Pair it with `#[serde(default)]` so a missing field is `None` as well.
pub fn optional_whole_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Whole(#[serde(deserialize_with = "whole_number")] i64);

    Ok(Option::<Whole>::deserialize(deserializer)?.map(|Whole(value)| value))
}
