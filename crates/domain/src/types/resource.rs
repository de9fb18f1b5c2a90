//! Resource (asset) records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::lenient::{de_opt_string, de_opt_u64, de_u64};

/// A stored asset as returned by search and resource lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "ref", deserialize_with = "de_u64")]
    pub reference: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub resource_type: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub file_extension: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub creation_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource {
    /// Display title.
    ///
    /// Search results carry the title in the `field8` column while single
    /// resource lookups may use `title`.
    pub fn title(&self) -> Option<&str> {
        ["title", "field8"]
            .iter()
            .filter_map(|key| self.extra.get(*key).and_then(Value::as_str))
            .find(|title| !title.is_empty())
    }
}
