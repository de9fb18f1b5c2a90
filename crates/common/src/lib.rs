//! Foundation utilities shared across Assetgate crates.
//!
//! Everything in this crate is pure: no I/O, no async runtime, no logging.
//! The request-authentication protocol lives here so that the exact bytes
//! that get signed can be tested without a network.
//!
//! # Modules
//! - [`signing`]: keyed SHA-256 request signatures and constant-time comparison
//! - [`security`]: [`Secret`] wrapper that zeroizes on drop
//! - [`query`]: ordered request parameters, canonical query building and the
//!   auth-mode aware assembler
//! - [`privacy`]: redaction of secret-bearing parameters before logging

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod privacy;
pub mod query;
pub mod security;
pub mod signing;

pub use privacy::{is_sensitive_key, RedactedParams, REDACTED};
pub use query::{assemble, build_query, AuthMode, ParamValue, Params, SignedQuery};
pub use security::Secret;
pub use signing::{constant_time_eq, sign};
