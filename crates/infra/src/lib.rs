//! # Assetgate Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - [`HttpTransport`], the signed reqwest implementation of
//!   [`ApiTransport`](assetgate_core::ApiTransport)
//! - [`UrlRewriter`] for public-to-internal download links
//! - Configuration loading from the environment, `.env` and config files
//!
//! ## Architecture
//! - Implements traits defined in `assetgate-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod config;
pub mod http;

use std::sync::Arc;

use assetgate_core::{BareClient, Client};
use assetgate_domain::{ClientConfig, Result};

// Re-export commonly used items
pub use http::{HttpTransport, UrlRewriter};

/// Bare client talking HTTP to the service described by `config`.
///
/// Attach capabilities with [`Client::with`].
///
/// # Errors
/// [`AssetgateError::Config`](assetgate_domain::AssetgateError::Config) when
/// the HTTP client cannot be built.
pub fn connect(config: ClientConfig) -> Result<BareClient> {
    let config = Arc::new(config);
    let transport = HttpTransport::new(Arc::clone(&config))?;
    Ok(Client::new(Arc::new(transport), config))
}
