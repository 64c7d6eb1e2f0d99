use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Tag {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: i64,
    pub name: String,
}
