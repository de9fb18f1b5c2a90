//! Caller input checks that run before any network call

use assetgate_domain::{AssetgateError, Result};

/// Identifiers on the remote service are positive integers.
pub fn positive_id(what: &str, id: u64) -> Result<u64> {
    if id == 0 {
        return Err(AssetgateError::Validation(format!("{what} must be a positive integer")));
    }
    Ok(id)
}

/// [`positive_id`] for every element of a batch.
pub fn positive_ids(what: &str, ids: &[u64]) -> Result<()> {
    ids.iter().try_for_each(|id| positive_id(what, *id).map(|_| ()))
}

/// Trimmed, non-empty text.
pub fn non_empty<'a>(what: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AssetgateError::Validation(format!("{what} must not be empty")));
    }
    Ok(trimmed)
}
