//! Canonical query string builder

use url::form_urlencoded;

use super::params::Params;

/// Key under which the principal (account name) is always sent first.
pub const PRINCIPAL_KEY: &str = "principal";

/// Serialize `principal` and `params` into the canonical query string.
///
/// The principal is always the first pair. Remaining pairs follow in
/// insertion order; `Null` values are skipped entirely, and a caller-supplied
/// `principal` key is ignored so the first pair cannot be shadowed. Pairs are
/// `application/x-www-form-urlencoded`.
pub fn build_query(principal: &str, params: &Params) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair(PRINCIPAL_KEY, principal);

    for (key, value) in params.iter() {
        if key == PRINCIPAL_KEY {
            continue;
        }
        if let Some(rendered) = value.render() {
            serializer.append_pair(key, &rendered);
        }
    }

    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ParamValue;

    #[test]
    fn principal_comes_first() {
        let params = Params::new().with("function", "do_search").with("search", "cat");
        assert_eq!(build_query("admin", &params), "principal=admin&function=do_search&search=cat");
    }

    #[test]
    fn empty_params_yield_only_principal() {
        assert_eq!(build_query("admin", &Params::new()), "principal=admin");
    }

    #[test]
    fn null_values_are_omitted() {
        let params = Params::new()
            .with("a", 1)
            .with("b", ParamValue::Null)
            .with("c", Option::<String>::None)
            .with("d", false);

        let query = build_query("admin", &params);
        assert_eq!(query, "principal=admin&a=1&d=false");
        assert!(!query.contains("b="));
        assert!(!query.contains("null"));
        assert!(!query.contains("undefined"));
    }

    #[test]
    fn values_are_form_encoded() {
        let params = Params::new().with("search", "red car & boat").with("path", "a/b?c=d");
        assert_eq!(
            build_query("jo smith", &params),
            "principal=jo+smith&search=red+car+%26+boat&path=a%2Fb%3Fc%3Dd"
        );
    }

    #[test]
    fn caller_cannot_shadow_principal() {
        let params = Params::new().with("principal", "intruder").with("x", 1);
        assert_eq!(build_query("admin", &params), "principal=admin&x=1");
    }
}
