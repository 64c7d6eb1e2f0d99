use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Coin {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: i64,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "image_64", default)]
    pub thumbnail_url: Option<String>,
}
