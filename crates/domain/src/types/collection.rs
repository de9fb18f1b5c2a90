//! Collection records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::lenient::{de_opt_bool, de_opt_string, de_opt_u64, de_u64};

/// A named set of resources owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(rename = "ref", deserialize_with = "de_u64")]
    pub reference: u64,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub name: Option<String>,
    /// Owner's user reference
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub user: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub count: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_bool")]
    pub public: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
