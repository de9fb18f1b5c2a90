//! # Assetgate Core
//!
//! Client logic with no network code.
//!
//! This crate contains:
//! - The [`ApiTransport`] port the HTTP layer implements
//! - Response normalization for a service that reports errors in 200 bodies
//! - The capability-composed [`Client`] and its operation groups
//! - Batch ceilings and input validation that run before any remote call
//!
//! ## Architecture Principles
//! - Depends on `assetgate-domain` and `assetgate-common` only
//! - All I/O goes through [`ApiTransport`]

pub mod batch;
pub mod capabilities;
pub mod client;
pub mod ports;
pub mod response;
pub mod validation;

pub use batch::enforce_batch_limit;
pub use capabilities::{
    filter_user_fields, Collections, Resources, Search, SearchOptions, SortOrder, Users,
    ALLOWED_USER_FIELDS,
};
pub use client::{Attach, BareClient, Capability, CapabilitySet, Caps, Client, FullClient, Off, On};
pub use ports::ApiTransport;
pub use response::{ensure_array, normalize};
