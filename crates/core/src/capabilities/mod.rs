//! Operation groups attachable to a [`Client`](crate::Client)
//!
//! Every group is a unit marker implementing [`Attach`](crate::client::Attach)
//! for any capability set and an inherent impl block on
//! `Client<Caps<..>>` that requires its own slot to be [`On`](crate::On).

pub mod collections;
pub mod resources;
pub mod search;
pub mod users;

use assetgate_domain::{coerce_u64, AssetgateError, Result};
use serde_json::Value;

pub use collections::Collections;
pub use resources::Resources;
pub use search::{Search, SearchOptions, SortOrder};
pub use users::{filter_user_fields, Users, ALLOWED_USER_FIELDS};

/// Mutations answer `false` when the service refused without an error body.
pub(crate) fn ensure_acknowledged(value: &Value, function: &str) -> Result<()> {
    match value {
        Value::Bool(false) => Err(AssetgateError::api(function, "the service reported failure")),
        _ => Ok(()),
    }
}

/// Reference of a created record: a bare number, a numeric string, or an
/// object carrying `ref` (or `user` for accounts).
pub(crate) fn created_ref(value: &Value, function: &str) -> Result<u64> {
    let reference = match value {
        Value::Object(map) => ["ref", "user"].iter().find_map(|key| map.get(*key).and_then(coerce_u64)),
        other => coerce_u64(other),
    };
    reference.filter(|r| *r > 0).ok_or_else(|| {
        AssetgateError::api(function, format!("expected a record reference, got {value}"))
    })
}
