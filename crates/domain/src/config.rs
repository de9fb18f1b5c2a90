//! Client configuration
//!
//! [`ClientConfig`] is validated exactly once, by
//! [`ClientConfigBuilder::build`]. A constructed config is immutable and is
//! shared read-only by every call the client makes.

use std::time::Duration;

use assetgate_common::{AuthMode, Secret};
use serde::Deserialize;
use url::Url;

use crate::constants::{
    DEFAULT_MAX_BATCH_SIZE, DEFAULT_SIGNUP_USERGROUP, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS,
    MIN_SECRET_CHARS,
};
use crate::errors::{AssetgateError, Result};

/// Validated client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    internal_url: Option<String>,
    user: String,
    secret: Secret,
    auth_mode: AuthMode,
    timeout: Duration,
    max_batch_size: usize,
    signup_usergroup: u32,
}

impl ClientConfig {
    /// Start building a configuration
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Public base address, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Internal-network base address, without trailing slash
    pub fn internal_url(&self) -> Option<&str> {
        self.internal_url.as_deref()
    }

    /// Address requests are sent to: the internal one when configured.
    pub fn request_base(&self) -> &str {
        self.internal_url.as_deref().unwrap_or(&self.base_url)
    }

    /// Principal sent with every request
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Signing secret
    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// Group assigned to accounts created by the provisioning workflow.
    ///
    /// This is the only source of the group; callers cannot override it.
    pub fn signup_usergroup(&self) -> u32 {
        self.signup_usergroup
    }
}

/// Builder for [`ClientConfig`].
///
/// Also the serde shape of a configuration file, so file and programmatic
/// configuration go through the same validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    internal_url: Option<String>,
    user: Option<String>,
    #[serde(alias = "key")]
    secret: Option<Secret>,
    auth_mode: Option<AuthMode>,
    timeout_secs: Option<u64>,
    #[serde(skip)]
    timeout: Option<Duration>,
    max_batch_size: Option<usize>,
    signup_usergroup: Option<u32>,
}

impl ClientConfigBuilder {
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn internal_url(mut self, url: impl Into<String>) -> Self {
        self.internal_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn secret(mut self, secret: impl Into<Secret>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    #[must_use]
    pub fn auth_mode(mut self, mode: AuthMode) -> Self {
        self.auth_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn max_batch_size(mut self, size: usize) -> Self {
        self.max_batch_size = Some(size);
        self
    }

    #[must_use]
    pub fn signup_usergroup(mut self, group: u32) -> Self {
        self.signup_usergroup = Some(group);
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// # Errors
    /// Returns [`AssetgateError::Config`] when a required field is missing or
    /// any value is out of range.
    pub fn build(self) -> Result<ClientConfig> {
        let base_url = normalize_base_url(
            "base_url",
            &self.base_url.ok_or_else(|| missing("base_url"))?,
        )?;
        let internal_url = self
            .internal_url
            .filter(|url| !url.trim().is_empty())
            .map(|url| normalize_base_url("internal_url", &url))
            .transpose()?;

        let user = self.user.map(|u| u.trim().to_string()).unwrap_or_default();
        if user.is_empty() {
            return Err(missing("user"));
        }

        let secret = self.secret.ok_or_else(|| missing("secret"))?;
        if secret.char_len() < MIN_SECRET_CHARS {
            return Err(AssetgateError::Config(format!(
                "secret must be at least {MIN_SECRET_CHARS} characters"
            )));
        }

        // A programmatic timeout wins over whole seconds from a file.
        let timeout = self
            .timeout
            .or_else(|| self.timeout_secs.map(Duration::from_secs))
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        if timeout.is_zero() || timeout > Duration::from_secs(MAX_TIMEOUT_SECS) {
            return Err(AssetgateError::Config(format!(
                "timeout must be greater than zero and at most {MAX_TIMEOUT_SECS}s"
            )));
        }

        let max_batch_size = self.max_batch_size.unwrap_or(DEFAULT_MAX_BATCH_SIZE);
        if max_batch_size == 0 {
            return Err(AssetgateError::Config("max_batch_size must be at least 1".into()));
        }

        let signup_usergroup = self.signup_usergroup.unwrap_or(DEFAULT_SIGNUP_USERGROUP);
        if signup_usergroup == 0 {
            return Err(AssetgateError::Config("signup_usergroup must be a positive id".into()));
        }

        Ok(ClientConfig {
            base_url,
            internal_url,
            user,
            secret,
            auth_mode: self.auth_mode.unwrap_or_default(),
            timeout,
            max_batch_size,
            signup_usergroup,
        })
    }
}

fn missing(field: &str) -> AssetgateError {
    AssetgateError::Config(format!("Missing required setting: {field}"))
}

fn normalize_base_url(field: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| AssetgateError::Config(format!("{field} is not a valid URL: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AssetgateError::Config(format!("{field} must use http or https")));
    }
    if parsed.host_str().is_none() {
        return Err(AssetgateError::Config(format!("{field} must include a host")));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(AssetgateError::Config(format!(
            "{field} must not carry a query string or fragment"
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    //! Unit tests for config.

    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn valid() -> ClientConfigBuilder {
        ClientConfig::builder().base_url("https://dam.example.com/").user("admin").secret(SECRET)
    }

    #[test]
    fn test_defaults_applied() {
        let config = valid().build().unwrap();
        assert_eq!(config.base_url(), "https://dam.example.com");
        assert_eq!(config.internal_url(), None);
        assert_eq!(config.request_base(), "https://dam.example.com");
        assert_eq!(config.auth_mode(), AuthMode::ApiKey);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.max_batch_size(), 100);
        assert_eq!(config.signup_usergroup(), DEFAULT_SIGNUP_USERGROUP);
    }

    #[test]
    fn test_internal_url_preferred_for_requests() {
        let config = valid().internal_url("http://dam.internal:8080///").build().unwrap();
        assert_eq!(config.internal_url(), Some("http://dam.internal:8080"));
        assert_eq!(config.request_base(), "http://dam.internal:8080");
    }

    #[test]
    fn test_short_secret_rejected() {
        let err = valid().secret("too-short").build().unwrap_err();
        assert!(matches!(err, AssetgateError::Config(msg) if msg.contains("32")));
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert!(ClientConfig::builder().user("admin").secret(SECRET).build().is_err());
        assert!(ClientConfig::builder()
            .base_url("https://dam.example.com")
            .secret(SECRET)
            .build()
            .is_err());
        assert!(ClientConfig::builder()
            .base_url("https://dam.example.com")
            .user("   ")
            .secret(SECRET)
            .build()
            .is_err());
        assert!(ClientConfig::builder()
            .base_url("https://dam.example.com")
            .user("admin")
            .build()
            .is_err());
    }

    #[test]
    fn test_invalid_urls_rejected() {
        assert!(valid().base_url("ftp://dam.example.com").build().is_err());
        assert!(valid().base_url("not a url").build().is_err());
        assert!(valid().base_url("https://dam.example.com/?x=1").build().is_err());
        assert!(valid().internal_url("file:///tmp").build().is_err());
    }

    /// Validates `ClientConfigBuilder::build` range checks.
    ///
    /// Assertions:
    /// - Ensures a zero timeout, a timeout just past the maximum, a zero
    ///   batch size and a zero signup group are all rejected.
    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(valid().timeout(Duration::from_secs(0)).build().is_err());
        assert!(valid().timeout(Duration::ZERO).build().is_err());
        assert!(valid().timeout(Duration::from_secs(301)).build().is_err());
        assert!(valid()
            .timeout(Duration::from_secs(MAX_TIMEOUT_SECS) + Duration::from_millis(1))
            .build()
            .is_err());
        assert!(valid().max_batch_size(0).build().is_err());
        assert!(valid().signup_usergroup(0).build().is_err());
    }

    /// Validates `ClientConfigBuilder::timeout` with sub-second precision.
    ///
    /// Assertions:
    /// - Confirms 500ms is accepted and kept exactly, not truncated to zero.
    /// - Confirms 1500ms is kept exactly, not truncated to one second.
    #[test]
    fn test_sub_second_timeout_preserved() {
        let config = valid().timeout(Duration::from_millis(500)).build().unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(500));

        let config = valid().timeout(Duration::from_millis(1500)).build().unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(1500));
    }

    /// Validates `ClientConfigBuilder` as the serde shape of a config file.
    ///
    /// Assertions:
    /// - Confirms the `key` alias, auth mode, timeout, batch size and signup
    ///   group all reach the built config.
    #[test]
    fn test_builder_deserializes_from_json() {
        let json = format!(
            r#"{{
                "base_url": "https://dam.example.com",
                "user": "admin",
                "key": "{SECRET}",
                "auth_mode": "sessionkey",
                "timeout_secs": 10,
                "max_batch_size": 25,
                "signup_usergroup": 7
            }}"#
        );
        let config = serde_json::from_str::<ClientConfigBuilder>(&json).unwrap().build().unwrap();
        assert_eq!(config.auth_mode(), AuthMode::SessionKey);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_batch_size(), 25);
        assert_eq!(config.signup_usergroup(), 7);
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let config = valid().build().unwrap();
        assert!(!format!("{config:?}").contains(SECRET));
    }
}
