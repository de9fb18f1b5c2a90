//! Canonical query construction
//!
//! The canonical query string is both what gets transmitted and what gets
//! signed, so it is produced in exactly one place ([`build_query`]) and
//! consumed by the assembler, which layers the function name, the signature
//! and the optional session-key marker on top.

pub mod assembler;
pub mod builder;
pub mod params;

pub use assembler::{assemble, AuthMode, SignedQuery, SESSION_KEY_MARKER};
pub use builder::{build_query, PRINCIPAL_KEY};
pub use params::{ParamValue, Params};
