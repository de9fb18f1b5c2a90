//! Public-to-internal URL rewriting
//!
//! The service builds download links from its public address. A client that
//! runs next to the service (same cluster, same VPC) should fetch through
//! the internal address instead.

use assetgate_domain::{AssetgateError, ClientConfig, Result};
use url::Url;

/// Rewrites URLs under the public base onto the internal base
#[derive(Debug, Clone)]
pub struct UrlRewriter {
    public: Url,
    internal: Option<String>,
}

impl UrlRewriter {
    /// # Errors
    /// [`AssetgateError::Config`] when `public` is not an absolute URL.
    pub fn new(public: &str, internal: Option<&str>) -> Result<Self> {
        let public = Url::parse(public)
            .map_err(|e| AssetgateError::Config(format!("Invalid public URL '{public}': {e}")))?;
        let internal = internal.map(|base| base.trim_end_matches('/').to_string());
        Ok(Self { public, internal })
    }

    /// Rewriter for the addresses in `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.base_url(), config.internal_url())
    }

    /// Whether rewriting can ever change a URL
    pub fn is_active(&self) -> bool {
        self.internal.is_some()
    }

    /// `url` with a leading public base replaced by the internal base.
    ///
    /// URLs on other hosts, other ports, or outside the public path prefix
    /// are returned unchanged, as is everything when no internal base is
    /// configured.
    pub fn rewrite(&self, url: &str) -> String {
        let Some(internal) = &self.internal else {
            return url.to_string();
        };
        let Ok(parsed) = Url::parse(url) else {
            return url.to_string();
        };
        if parsed.scheme() != self.public.scheme()
            || parsed.host_str() != self.public.host_str()
            || parsed.port_or_known_default() != self.public.port_or_known_default()
        {
            return url.to_string();
        }

        let prefix = self.public.path().trim_end_matches('/');
        let Some(rest) = parsed.path().strip_prefix(prefix) else {
            return url.to_string();
        };
        if !rest.is_empty() && !rest.starts_with('/') {
            return url.to_string();
        }

        let mut rewritten = format!("{internal}{rest}");
        if let Some(query) = parsed.query() {
            rewritten.push('?');
            rewritten.push_str(query);
        }
        if let Some(fragment) = parsed.fragment() {
            rewritten.push('#');
            rewritten.push_str(fragment);
        }
        rewritten
    }
}
