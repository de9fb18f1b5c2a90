//! # Assetgate Domain
//!
//! Domain types, configuration and the error taxonomy.
//!
//! This crate contains:
//! - Records returned by the remote service (Resource, Collection, User, …)
//! - [`AssetgateError`] and the crate-wide [`Result`] alias
//! - [`ClientConfig`], validated once at construction
//! - Lenient numeric coercion for stringified identifiers
//!
//! ## Architecture
//! - Depends only on `assetgate-common` (for [`Secret`] and [`AuthMode`])
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use assetgate_common::{AuthMode, Secret};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use errors::{AssetgateError, Result};
pub use types::*;
pub use utils::{coerce_number, coerce_u64};
