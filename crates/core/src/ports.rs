//! Port interfaces for talking to the remote service
//!
//! Capabilities only ever see this trait; the HTTP implementation lives in
//! `assetgate-infra`.

use assetgate_common::Params;
use assetgate_domain::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Signed request primitive
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Call a remote function and return its normalized response.
    ///
    /// Implementations sign `params`, perform the call, map transport and
    /// status failures into the error taxonomy and run the body through
    /// [`normalize`](crate::response::normalize).
    async fn request(&self, function: &str, params: Params) -> Result<Value>;

    /// Rewrite a service-issued URL for the network this client runs on.
    fn rewrite_url(&self, url: &str) -> String {
        url.to_string()
    }
}
