//! Shared test helpers for `assetgate-core` integration tests.
//!
//! A scripted in-memory transport records every call so tests can assert on
//! exactly which remote functions ran and with which parameters.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use assetgate_common::{ParamValue, Params};
use assetgate_core::{ApiTransport, BareClient, Client};
use assetgate_domain::{AssetgateError, ClientConfig, Result as DomainResult};
use async_trait::async_trait;
use serde_json::Value;

pub const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

/// One recorded remote call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub function: String,
    pub params: Params,
}

impl RecordedCall {
    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }
}

/// In-memory `ApiTransport` answering from a queue of scripted responses.
///
/// When the queue runs dry every call answers `true`.
#[derive(Default, Clone)]
pub struct RecordingTransport {
    responses: Arc<Mutex<VecDeque<DomainResult<Value>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    rewrite: Option<(String, String)>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn respond(self, value: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(value));
        self
    }

    /// Queue a failure.
    pub fn fail(self, error: AssetgateError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Rewrite URLs starting with `from` to start with `to`.
    pub fn rewriting(mut self, from: &str, to: &str) -> Self {
        self.rewrite = Some((from.to_string(), to.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn functions(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.function).collect()
    }
}

#[async_trait]
impl ApiTransport for RecordingTransport {
    async fn request(&self, function: &str, params: Params) -> DomainResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall { function: function.to_string(), params });
        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(Value::Bool(true)))
    }

    fn rewrite_url(&self, url: &str) -> String {
        match &self.rewrite {
            Some((from, to)) if url.starts_with(from.as_str()) => {
                format!("{to}{}", &url[from.len()..])
            }
            _ => url.to_string(),
        }
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig::builder()
        .base_url("https://dam.example.com")
        .user("integration")
        .secret(TEST_SECRET)
        .build()
        .expect("valid test config")
}

pub fn bare_client(transport: &RecordingTransport) -> BareClient {
    bare_client_with(transport, test_config())
}

pub fn bare_client_with(transport: &RecordingTransport, config: ClientConfig) -> BareClient {
    Client::new(Arc::new(transport.clone()), Arc::new(config))
}
