use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar entry as returned by the events endpoint. Never cached.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Event {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub coin_id: i64,
    #[serde(rename = "caption")]
    pub caption_text: String,
    #[serde(rename = "date_start", deserialize_with = "deserialize_start_date")]
    pub start_date: NaiveDate,
    #[serde(rename = "source")]
    pub source_url: String,
    // Plural on the wire but carries a single tag id.
    #[serde(
        rename = "tags",
        default,
        deserialize_with = "super::deserialize_lenient_id"
    )]
    pub tag_id: Option<i64>,
}

// `date_start` is "YYYY-MM-DD" with an optional " HH:MM" suffix.
fn deserialize_start_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let date_part = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|e| D::Error::custom(format!("invalid date_start {raw:?}: {e}")))
}
