//! Signed query assembly
//!
//! Combines the canonical query builder with the signer and handles the one
//! place where the two authentication modes diverge: session-key callers send
//! an extra `authmode=sessionkey` pair. The server strips that pair before
//! verifying, so it is appended only after the signature has been computed.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::builder::build_query;
use super::params::Params;
use crate::security::Secret;
use crate::signing::sign;

/// Marker appended to session-key requests after signing.
pub const SESSION_KEY_MARKER: &str = "authmode=sessionkey";

/// Keys the assembler owns; callers cannot set them.
const RESERVED_KEYS: [&str; 3] = ["function", "sign", "authmode"];

/// How the secret should be interpreted by the remote service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Long-lived per-user API key
    #[default]
    #[serde(alias = "api-key", alias = "api_key")]
    ApiKey,
    /// Short-lived session key obtained by the user
    #[serde(alias = "session-key", alias = "session_key")]
    SessionKey,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey => write!(f, "apikey"),
            Self::SessionKey => write!(f, "sessionkey"),
        }
    }
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apikey" | "api-key" | "api_key" | "key" => Ok(Self::ApiKey),
            "sessionkey" | "session-key" | "session_key" | "session" => Ok(Self::SessionKey),
            other => Err(format!("Unknown auth mode: {other}")),
        }
    }
}

/// A query ready to be sent, plus the signature computed over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedQuery {
    /// Canonical query, with the session-key marker when applicable
    pub query: String,
    /// Lowercase hex signature over the query without the marker
    pub signature: String,
}

impl SignedQuery {
    /// Full query string including the trailing `sign` pair
    pub fn to_query_string(&self) -> String {
        format!("{}&sign={}", self.query, self.signature)
    }
}

/// Build and sign the query for one API call.
///
/// `function` is placed immediately after the principal; caller params follow
/// in insertion order. Caller entries named `function`, `sign` or `authmode`
/// are dropped.
pub fn assemble(
    principal: &str,
    secret: &Secret,
    auth_mode: AuthMode,
    function: &str,
    params: &Params,
) -> SignedQuery {
    let mut merged = Params::new().with("function", function);
    for (key, value) in params.iter() {
        if !RESERVED_KEYS.contains(&key) {
            merged.set(key, value.clone());
        }
    }

    let canonical = build_query(principal, &merged);
    let signature = sign(secret.expose(), &canonical);

    let query = match auth_mode {
        AuthMode::ApiKey => canonical,
        AuthMode::SessionKey => format!("{canonical}&{SESSION_KEY_MARKER}"),
    };

    SignedQuery { query, signature }
}
