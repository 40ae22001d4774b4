//! Serde helpers for loosely typed API fields.

use serde::Deserializer;
use serde::de::{self, Visitor};
use std::fmt;

struct CountVisitor;

impl Visitor<'_> for CountVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer, a whole float, a numeric string or null")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(value)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i64::try_from(value).map_err(de::Error::custom)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if value.fract() == 0.0 && value.is_finite() {
            Ok(value as i64)
        } else {
            Err(de::Error::custom(format!("{value} is not a whole number")))
        }
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        trimmed.parse::<i64>().map_err(de::Error::custom)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(0)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(0)
    }
}

/// Deserializes a stock count sent as a number or a string (multipart
/// uploads store form values as text). `null` and `""` read as zero.
///
/// # Errors
///
/// Returns an error for non-numeric strings or fractional values.
pub fn count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(CountVisitor)
}

/// Like [`count`], for line quantities that cannot be negative.
///
/// # Errors
///
/// Returns an error for negative or out-of-range values.
pub fn quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = deserializer.deserialize_any(CountVisitor)?;
    u32::try_from(raw).map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Stock {
        #[serde(deserialize_with = "super::count", default)]
        qty: i64,
    }

    #[derive(Deserialize)]
    struct Line {
        #[serde(deserialize_with = "super::quantity")]
        quantity: u32,
    }

    fn stock(json: &str) -> Result<i64, serde_json::Error> {
        serde_json::from_str::<Stock>(json).map(|s| s.qty)
    }

    #[test]
    fn test_count_accepts_numbers_and_strings() {
        assert_eq!(stock(r#"{"qty": 12}"#).unwrap(), 12);
        assert_eq!(stock(r#"{"qty": "7"}"#).unwrap(), 7);
        assert_eq!(stock(r#"{"qty": 3.0}"#).unwrap(), 3);
        assert_eq!(stock(r#"{"qty": null}"#).unwrap(), 0);
        assert_eq!(stock(r#"{"qty": ""}"#).unwrap(), 0);
        assert_eq!(stock("{}").unwrap(), 0);
    }

    #[test]
    fn test_count_rejects_garbage() {
        assert!(stock(r#"{"qty": "many"}"#).is_err());
        assert!(stock(r#"{"qty": 2.5}"#).is_err());
    }

    #[test]
    fn test_quantity_rejects_negative() {
        assert!(serde_json::from_str::<Line>(r#"{"quantity": -1}"#).is_err());
        let line: Line = serde_json::from_str(r#"{"quantity": "2"}"#).unwrap();
        assert_eq!(line.quantity, 2);
    }
}
