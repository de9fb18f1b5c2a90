//! Signed HTTP transport
//!
//! Every remote function is invoked as a single `GET` against the service
//! root with the signed query attached. Failures are mapped into
//! [`AssetgateError`] here and every body is passed through
//! [`normalize`](assetgate_core::response::normalize) so capabilities only
//! ever see clean values.

use std::sync::Arc;
use std::time::Duration;

use assetgate_common::{assemble, Params, RedactedParams};
use assetgate_core::response::{excerpt, normalize};
use assetgate_core::ApiTransport;
use assetgate_domain::{AssetgateError, ClientConfig, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::url_rewriter::UrlRewriter;

const USER_AGENT: &str = concat!("assetgate/", env!("CARGO_PKG_VERSION"));

/// [`ApiTransport`] over reqwest
#[derive(Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
    config: Arc<ClientConfig>,
    rewriter: UrlRewriter,
}

impl HttpTransport {
    /// # Errors
    /// [`AssetgateError::Config`] when the HTTP client cannot be built.
    pub fn new(config: Arc<ClientConfig>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = ReqwestClient::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| AssetgateError::Config(format!("Failed to build HTTP client: {e}")))?;

        let rewriter = UrlRewriter::from_config(&config)?;

        Ok(Self { client, config, rewriter })
    }

    /// Configuration this transport signs with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, function: &str, params: &Params) -> String {
        let signed = assemble(
            self.config.user(),
            self.config.secret(),
            self.config.auth_mode(),
            function,
            params,
        );
        format!("{}/?{}", self.config.request_base(), signed.to_query_string())
    }

    async fn send(&self, function: &str, url: String) -> Result<(StatusCode, String)> {
        let timeout = self.config.timeout();

        let response = match tokio::time::timeout(timeout, self.client.get(url).send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(map_reqwest_error(function, &err, timeout)),
            Err(_) => return Err(timed_out(function, timeout)),
        };

        let status = response.status();
        let body = match tokio::time::timeout(timeout, response.text()).await {
            Ok(Ok(body)) => body,
            Ok(Err(err)) => return Err(map_reqwest_error(function, &err, timeout)),
            Err(_) => return Err(timed_out(function, timeout)),
        };
        Ok((status, body))
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    #[instrument(skip(self, params), fields(auth_mode = %self.config.auth_mode()))]
    async fn request(&self, function: &str, params: Params) -> Result<Value> {
        debug!(params = %RedactedParams(&params), "dispatching request");

        let url = self.endpoint(function, &params);
        let (status, body) = self.send(function, url).await?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(map_status_error(function, status, &body));
        }

        normalize(parse_body(body), function)
    }

    fn rewrite_url(&self, url: &str) -> String {
        self.rewriter.rewrite(url)
    }
}

/// JSON when the body parses, the raw text otherwise, `null` when empty.
fn parse_body(body: String) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

fn map_status_error(function: &str, status: StatusCode, body: &str) -> AssetgateError {
    let detail = (!body.trim().is_empty()).then(|| excerpt(body.trim()));
    warn!(status = status.as_u16(), "request failed");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AssetgateError::Permission {
            function: function.to_string(),
            detail: detail.or_else(|| Some(format!("HTTP {}", status.as_u16()))),
        },
        _ => AssetgateError::Api {
            function: function.to_string(),
            status: Some(status.as_u16()),
            detail: detail.or_else(|| status.canonical_reason().map(str::to_string)),
        },
    }
}

fn map_reqwest_error(function: &str, err: &reqwest::Error, timeout: Duration) -> AssetgateError {
    if err.is_timeout() {
        return timed_out(function, timeout);
    }
    // reqwest includes the URL in its Display output; keep the signed query
    // out of error messages.
    let message = if err.is_connect() {
        "connection failed".to_string()
    } else if err.is_body() || err.is_decode() {
        "failed to read response body".to_string()
    } else {
        "request failed".to_string()
    };
    AssetgateError::Transport { function: function.to_string(), message }
}

fn timed_out(function: &str, timeout: Duration) -> AssetgateError {
    AssetgateError::Transport {
        function: function.to_string(),
        message: format!("timed out after {}s", timeout.as_secs_f64()),
    }
}
