//! Redaction of secret-bearing request parameters
//!
//! Request parameters may carry passwords (user provisioning) or key
//! material. Anything that formats parameters for a log sink goes through
//! [`RedactedParams`]; there is no unredacted formatter.

use std::fmt;

use crate::query::Params;

/// Placeholder written in place of a sensitive value
pub const REDACTED: &str = "[REDACTED]";

const SENSITIVE_FRAGMENTS: [&str; 5] = ["password", "secret", "token", "session", "privatekey"];
const SENSITIVE_EXACT: [&str; 4] = ["key", "sign", "signature", "authmode"];

/// Whether a parameter key names secret-bearing data.
///
/// Matching is case-insensitive. `key` must be the whole name or a suffix
/// (`apikey`, `private_key`) so that e.g. `keywords` is left readable.
pub fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SENSITIVE_EXACT.contains(&key.as_str())
        || SENSITIVE_FRAGMENTS.iter().any(|fragment| key.contains(fragment))
        || key.ends_with("_key")
        || key.ends_with("apikey")
}

/// Display adapter that renders params as `key=value` pairs with sensitive
/// values replaced by [`REDACTED`] and null values omitted.
#[derive(Debug, Clone, Copy)]
pub struct RedactedParams<'a>(pub &'a Params);

impl fmt::Display for RedactedParams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in self.0.iter() {
            let Some(rendered) = value.render() else {
                continue;
            };
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            if is_sensitive_key(key) {
                write!(f, "{key}={REDACTED}")?;
            } else {
                write!(f, "{key}={rendered}")?;
            }
        }
        Ok(())
    }
}
