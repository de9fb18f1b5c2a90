//! Request signatures
//!
//! The remote API authenticates a call by recomputing a SHA-256 digest over
//! the shared secret followed by the literal query string of the request and
//! comparing it with the `sign` parameter.

use sha2::{Digest, Sha256};

/// Compute the request signature for a canonical query string.
///
/// Returns the lowercase hex SHA-256 digest of `secret ‖ canonical_query`.
/// The query passed here must be the exact string that will be transmitted,
/// minus any auth-mode marker (the server strips that before verifying).
pub fn sign(secret: &str, canonical_query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(canonical_query.as_bytes());
    hex::encode(hasher.finalize())
}

/// Constant-time comparison to prevent timing attacks
///
/// Use this for digests, tokens and any other secret-derived value. Lengths
/// are not secret, so a length mismatch returns early.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    //! Unit tests for signing.

    use super::*;

    #[test]
    fn sign_is_sha256_of_secret_then_query() {
        // sha256("abc")
        assert_eq!(
            sign("ab", "c"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(sign("a", "bc"), sign("ab", "c"));
    }

    #[test]
    fn sign_of_empty_input_matches_known_digest() {
        assert_eq!(
            sign("", ""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sign_output_is_lowercase_hex() {
        let digest = sign("0123456789abcdef0123456789abcdef", "principal=admin&function=do_search");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn sign_depends_on_secret() {
        let query = "principal=admin&function=get_user_collections";
        assert_ne!(sign("secret-one", query), sign("secret-two", query));
    }

    #[test]
    fn constant_time_eq_matches_equality() {
        assert!(constant_time_eq(b"deadbeef", b"deadbeef"));
        assert!(!constant_time_eq(b"deadbeef", b"deadbeee"));
        assert!(!constant_time_eq(b"deadbeef", b"deadbee"));
        assert!(constant_time_eq(b"", b""));
    }
}
