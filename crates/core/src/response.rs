//! Response normalization
//!
//! The remote service reports success and failure alike with a 200 status
//! and encodes the difference in the body: structured data, a bare string
//! payload (often a URL or path), a plain-text error message, or JSON that
//! was itself encoded as a JSON string. [`normalize`] reconciles all of those
//! into one value per call or a typed error.
//!
//! Decision procedure:
//! 1. `null` → `null`
//! 2. text is scanned for denial phrases and error markers unless it parses
//!    as a JSON object or array
//! 3. text that parses as JSON → the parsed value, normalized again
//! 4. text that does not parse → unchanged
//! 5. object with a truthy `error` field → API error
//! 6. anything else → unchanged

use assetgate_domain::{AssetgateError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use assetgate_domain::utils::lenient::{coerce_number, coerce_u64};

/// Maximum number of characters of remote text kept in an error detail
pub const EXCERPT_CHARS: usize = 200;

/// Nested JSON-in-a-string layers unwrapped before giving up
const MAX_DECODE_DEPTH: usize = 3;

const PERMISSION_PHRASES: [&str; 8] = [
    "access denied",
    "permission denied",
    "not authorised",
    "not authorized",
    "unauthorised",
    "unauthorized",
    "invalid signature",
    "forbidden",
];

const ERROR_MARKERS: [&str; 4] = ["error:", "fatal error", "exception:", "invalid function"];

const WRAPPED_LIST_KEYS: [&str; 2] = ["resources", "data"];

/// Classify a raw payload into a normalized value or a typed error.
///
/// # Errors
/// [`AssetgateError::Permission`] for denial text, [`AssetgateError::Api`]
/// for error text or an object with a truthy `error` field.
pub fn normalize(raw: Value, function: &str) -> Result<Value> {
    normalize_at_depth(raw, function, 0)
}

fn normalize_at_depth(raw: Value, function: &str, depth: usize) -> Result<Value> {
    match raw {
        Value::Null => Ok(Value::Null),
        Value::String(text) => normalize_text(text, function, depth),
        Value::Object(map) => match map.get("error") {
            Some(error) if is_truthy(error) => Err(AssetgateError::api(function, describe(error))),
            _ => Ok(Value::Object(map)),
        },
        other => Ok(other),
    }
}

fn normalize_text(text: String, function: &str, depth: usize) -> Result<Value> {
    let trimmed = text.trim();
    let parsed = if trimmed.is_empty() {
        None
    } else {
        serde_json::from_str::<Value>(trimmed).ok()
    };

    // Only text that actually parses as an object or array skips the scan;
    // bracketed error text such as `[Access denied]` is still classified.
    let structured = parsed.is_some() && opens_structured_data(trimmed);
    if !structured {
        if let Some(err) = classify_failure_text(trimmed, function) {
            return Err(err);
        }
    }

    match parsed {
        Some(parsed) if depth < MAX_DECODE_DEPTH => normalize_at_depth(parsed, function, depth + 1),
        _ => Ok(Value::String(text)),
    }
}

fn opens_structured_data(text: &str) -> bool {
    text.starts_with('{') || text.starts_with('[')
}

fn classify_failure_text(text: &str, function: &str) -> Option<AssetgateError> {
    let lower = text.to_lowercase();

    if PERMISSION_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        return Some(AssetgateError::permission(function, excerpt(text)));
    }
    if lower.starts_with("error") || ERROR_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return Some(AssetgateError::api(function, excerpt(text)));
    }
    None
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => excerpt(s),
        other => excerpt(&other.to_string()),
    }
}

/// First [`EXCERPT_CHARS`] characters of `text`, marked when truncated.
pub fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

/// Unwrap a collection-ish response into a list. Never fails.
///
/// Accepts a true array, `null` (empty), or an object wrapping the list
/// under `resources` or `data`. Any other shape yields an empty list.
pub fn ensure_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => WRAPPED_LIST_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Deserialize a normalized value into a domain record.
///
/// # Errors
/// [`AssetgateError::Api`] naming `function` when the shape is unexpected.
pub fn decode<T: DeserializeOwned>(value: Value, function: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        AssetgateError::api(function, format!("unexpected response shape: {e}"))
    })
}

/// [`ensure_array`] followed by [`decode`] of every element.
///
/// # Errors
/// [`AssetgateError::Api`] when any element has an unexpected shape.
pub fn decode_list<T: DeserializeOwned>(value: Value, function: &str) -> Result<Vec<T>> {
    ensure_array(value).into_iter().map(|item| decode(item, function)).collect()
}

#[cfg(test)]
mod tests {
    //! Unit tests for response normalization.

    use assetgate_domain::Resource;
    use serde_json::json;

    use super::*;

    const F: &str = "do_search";

    #[test]
    fn null_stays_null() {
        assert_eq!(normalize(Value::Null, F).unwrap(), Value::Null);
    }

    /// Validates `normalize` for JSON delivered as text.
    ///
    /// Assertions:
    /// - Confirms object, array and number text parse to the matching value.
    #[test]
    fn json_text_is_parsed() {
        assert_eq!(normalize(json!("{\"ref\":42}"), F).unwrap(), json!({"ref": 42}));
        assert_eq!(normalize(json!("[1,2]"), F).unwrap(), json!([1, 2]));
        assert_eq!(normalize(json!("17"), F).unwrap(), json!(17));
    }

    #[test]
    fn double_encoded_json_is_resolved() {
        let once = serde_json::to_string(&json!({"ref": 42})).unwrap();
        let twice = serde_json::to_string(&once).unwrap();
        assert_eq!(normalize(Value::String(twice), F).unwrap(), json!({"ref": 42}));
    }

    /// Validates `normalize` for bare string payloads.
    ///
    /// Assertions:
    /// - Confirms a URL and a filesystem path come back unchanged.
    #[test]
    fn url_payload_passes_through() {
        let url = "https://host/path";
        assert_eq!(normalize(json!(url), F).unwrap(), json!(url));

        let path = "/var/www/filestore/1/2_abc/12scr.jpg";
        assert_eq!(normalize(json!(path), F).unwrap(), json!(path));
    }

    /// Validates `normalize` for denial text.
    ///
    /// Assertions:
    /// - Ensures `err.is_permission_error()` evaluates to true for
    ///   `Access denied` and `Invalid signature`.
    /// - Confirms the error names the calling function.
    #[test]
    fn access_denied_text_is_permission_error() {
        let err = normalize(json!("Access denied"), F).unwrap_err();
        assert!(err.is_permission_error());
        assert_eq!(err.function(), Some(F));

        let err = normalize(json!("Invalid signature"), "get_user").unwrap_err();
        assert!(err.is_permission_error());
    }

    /// Validates `normalize` for plain-text error messages.
    ///
    /// Assertions:
    /// - Ensures each message is an API error and not a permission error.
    #[test]
    fn error_text_is_api_error() {
        for text in ["Error: invalid resource", "ERROR - missing parameter", "PHP Fatal error in x"] {
            let err = normalize(json!(text), F).unwrap_err();
            assert!(err.is_api_error(), "{text}");
            assert!(!err.is_permission_error(), "{text}");
        }
    }

    /// Validates `normalize` for error text that starts with a bracket but is
    /// not JSON.
    ///
    /// Assertions:
    /// - Ensures `[Access denied]` is a permission error.
    /// - Ensures `{Error: invalid function}` is an API error naming the
    ///   function.
    /// - Ensures `[ERROR] Invalid signature` is a permission error, since
    ///   denial phrases win over error markers.
    #[test]
    fn bracketed_error_text_is_still_classified() {
        let err = normalize(json!("[Access denied]"), F).unwrap_err();
        assert!(err.is_permission_error());

        let err = normalize(json!("{Error: invalid function}"), F).unwrap_err();
        assert!(err.is_api_error());
        assert!(!err.is_permission_error());
        assert_eq!(err.function(), Some(F));

        let err = normalize(json!(" [ERROR] Invalid signature "), F).unwrap_err();
        assert!(err.is_permission_error());
    }

    /// Validates that error details are truncated.
    ///
    /// Assertions:
    /// - Confirms the detail holds `EXCERPT_CHARS` characters plus the
    ///   truncation mark.
    #[test]
    fn error_detail_is_bounded() {
        let long = format!("Error: {}", "x".repeat(1000));
        match normalize(json!(long), F).unwrap_err() {
            AssetgateError::Api { detail: Some(detail), .. } => {
                assert_eq!(detail.chars().count(), EXCERPT_CHARS + 1);
                assert!(detail.starts_with("Error: x"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    /// Validates `normalize` for objects carrying an `error` field.
    ///
    /// Assertions:
    /// - Confirms `{"error": "x"}` maps to an API error with detail `x`.
    /// - Confirms the same object delivered as text maps the same way.
    #[test]
    fn object_with_error_field_is_api_error() {
        let err = normalize(json!({"error": "x"}), F).unwrap_err();
        assert_eq!(
            err,
            AssetgateError::Api { function: F.into(), status: None, detail: Some("x".into()) }
        );

        let err = normalize(json!("{\"error\":\"Resource not found\"}"), F).unwrap_err();
        assert!(matches!(err, AssetgateError::Api { detail: Some(d), .. } if d == "Resource not found"));
    }

    #[test]
    fn falsy_error_field_is_not_an_error() {
        let value = json!({"error": false, "ref": 1});
        assert_eq!(normalize(value.clone(), F).unwrap(), value);
        let value = json!({"error": null});
        assert_eq!(normalize(value.clone(), F).unwrap(), value);
    }

    /// Validates that valid JSON text is not scanned for error markers.
    ///
    /// Assertions:
    /// - Confirms an array whose field value contains `Error:` parses
    ///   unchanged.
    #[test]
    fn structured_text_mentioning_errors_is_not_scanned() {
        let text = r#"[{"ref":"1","field8":"Error: the movie"}]"#;
        assert_eq!(
            normalize(json!(text), F).unwrap(),
            json!([{"ref": "1", "field8": "Error: the movie"}])
        );
    }

    #[test]
    fn scalars_and_arrays_pass_through() {
        assert_eq!(normalize(json!(true), F).unwrap(), json!(true));
        assert_eq!(normalize(json!(5), F).unwrap(), json!(5));
        assert_eq!(normalize(json!([{"ref": 1}]), F).unwrap(), json!([{"ref": 1}]));
        assert_eq!(normalize(json!(""), F).unwrap(), json!(""));
    }

    /// Validates `ensure_array` across response shapes.
    ///
    /// Assertions:
    /// - Confirms arrays and `resources`/`data` wrappers are unwrapped.
    /// - Confirms `null`, text and unknown objects yield an empty list.
    #[test]
    fn ensure_array_never_fails() {
        assert_eq!(ensure_array(Value::Null), Vec::<Value>::new());
        assert_eq!(ensure_array(json!({"resources": [1]})), vec![json!(1)]);
        assert_eq!(ensure_array(json!({"data": [{"ref": 2}]})), vec![json!({"ref": 2})]);
        assert_eq!(ensure_array(json!({"other": 1})), Vec::<Value>::new());
        assert_eq!(ensure_array(json!({"resources": "nope"})), Vec::<Value>::new());
        assert_eq!(ensure_array(json!("text")), Vec::<Value>::new());
        assert_eq!(ensure_array(json!([1, 2])), vec![json!(1), json!(2)]);
    }

    #[test]
    fn decode_list_reports_function_on_bad_shape() {
        #[derive(Debug, serde::Deserialize)]
        struct Item {
            #[allow(dead_code)]
            id: u64,
        }
        let err = decode_list::<Item>(json!([{"id": "x"}]), "get_nodes").unwrap_err();
        assert_eq!(err.function(), Some("get_nodes"));
    }

    /// Validates `decode_list` for records without a usable identifier.
    ///
    /// Assertions:
    /// - Ensures an empty `ref` is an API error naming the function rather
    ///   than a resource with identifier `0`.
    #[test]
    fn decode_list_rejects_empty_identifier() {
        let err = decode_list::<Resource>(json!([{"ref": ""}]), F).unwrap_err();
        assert!(err.is_api_error());
        assert_eq!(err.function(), Some(F));
    }
}
