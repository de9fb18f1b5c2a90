//! Shared helpers for `assetgate-infra` integration tests.

use std::time::Duration;

use assetgate_domain::{ClientConfig, ClientConfigBuilder};
use wiremock::MockServer;

pub const TEST_USER: &str = "integration";
pub const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

/// Install a test-writer subscriber once so `RUST_LOG` works under
/// `cargo test -- --nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builder pointed at `server` with the test principal and secret.
pub fn builder_for(server: &MockServer) -> ClientConfigBuilder {
    ClientConfig::builder().base_url(server.uri()).user(TEST_USER).secret(TEST_SECRET)
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    builder_for(server).build().expect("valid test config")
}

pub fn short_timeout_config(server: &MockServer) -> ClientConfig {
    builder_for(server).timeout(Duration::from_secs(1)).build().expect("valid test config")
}

/// Raw query string of the only request `server` received.
pub async fn single_query(server: &MockServer) -> String {
    let requests = server.received_requests().await.expect("request recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests[0].url.query().unwrap_or_default().to_string()
}
