//! HTTP transport and URL handling

pub mod transport;
pub mod url_rewriter;

pub use transport::HttpTransport;
pub use url_rewriter::UrlRewriter;
