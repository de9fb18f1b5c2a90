//! Metadata field definitions and fixed-list nodes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::lenient::{de_opt_string, de_opt_u64, de_u64};

/// A metadata field, optionally with the value held for one resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "ref", deserialize_with = "de_u64")]
    pub reference: u64,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub title: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "de_opt_u64")]
    pub field_type: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One option of a fixed-list (category tree, dropdown, …) field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "ref", deserialize_with = "de_u64")]
    pub reference: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub resource_type_field: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub parent: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub order_by: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
