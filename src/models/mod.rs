pub mod coin;
pub mod event;
pub mod tag;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

// Coindar sends ids either as numbers or as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid id: {text:?}"))),
    }
}

/// Anything that is not a single id (null, "", "4,5", ...) decodes as no id.
pub(crate) fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let id = match &raw {
        serde_json::Value::Null => None,
        serde_json::Value::Number(number) => number.as_i64(),
        serde_json::Value::String(text) if text.trim().is_empty() => None,
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    if id.is_none() && !raw.is_null() && raw != serde_json::Value::String(String::new()) {
        tracing::debug!(value = %raw, "Ignoring unrecognised id");
    }
    Ok(id)
}
