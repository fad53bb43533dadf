//! Field decoders for records coming from the goal source.
//!
//! A field of the wrong JSON type decodes to its default instead of
//! rejecting the whole request.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings pass through, numbers and booleans are rendered as text,
/// anything else is empty.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Numbers and numeric strings; anything else, or a non-finite value, is 0.
pub fn progress<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(value.filter(|v| v.is_finite()).unwrap_or_default())
}

/// Only strings are kept.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Non-empty strings pass through; anything else becomes `default`.
pub fn label_or<'de, D>(deserializer: D, default: &str) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => s,
        _ => default.to_string(),
    })
}

/// `null` becomes the default; any other value must decode as `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "text")]
        text: String,
        #[serde(default, deserialize_with = "progress")]
        progress: f64,
        #[serde(default, deserialize_with = "optional_text")]
        link: Option<String>,
    }

    fn decode(json: &str) -> Record {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numeric_string_progress_is_parsed() {
        assert_eq!(decode(r#"{"progress":"80"}"#).progress, 80.0);
        assert_eq!(decode(r#"{"progress":" 42.5 "}"#).progress, 42.5);
    }

    #[test]
    fn test_unusable_progress_is_zero() {
        assert_eq!(decode(r#"{"progress":"lots"}"#).progress, 0.0);
        assert_eq!(decode(r#"{"progress":true}"#).progress, 0.0);
        assert_eq!(decode(r#"{"progress":[1]}"#).progress, 0.0);
        assert_eq!(decode(r#"{"progress":"NaN"}"#).progress, 0.0);
    }

    #[test]
    fn test_numeric_text_is_rendered() {
        assert_eq!(decode(r#"{"text":12}"#).text, "12");
        assert_eq!(decode(r#"{"text":{"a":1}}"#).text, "");
    }

    #[test]
    fn test_non_string_link_is_dropped() {
        assert_eq!(decode(r#"{"link":7}"#).link, None);
        assert_eq!(decode(r#"{"link":"o1"}"#).link.as_deref(), Some("o1"));
    }
}
