//! Bulk operation ceiling

use assetgate_domain::{AssetgateError, Result};

/// Reject `ids` before any remote call when it holds more than `max` items.
///
/// Exactly `max` items is allowed.
///
/// # Errors
/// [`AssetgateError::BatchSizeLimit`] naming the attempted size and the max.
pub fn enforce_batch_limit<T>(ids: &[T], max: usize) -> Result<()> {
    if ids.len() > max {
        return Err(AssetgateError::BatchSizeLimit { attempted: ids.len(), max });
    }
    Ok(())
}
