//! User account records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::lenient::{de_opt_bool, de_opt_string, de_opt_u64, de_u64};

/// A user account on the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "ref", deserialize_with = "de_u64")]
    pub reference: u64,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub fullname: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub usergroup: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_bool")]
    pub approved: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
