//! Error types used throughout the client

use thiserror::Error;

/// Main error type for Assetgate
///
/// Every variant raised after a request was attempted carries the remote
/// function name so failures stay traceable across the network boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetgateError {
    /// Invalid or missing setup; fatal to the client being constructed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote service denied the call (401/403 or an access-denied body).
    #[error("Permission denied calling {function}{}", detail_suffix(.detail))]
    Permission { function: String, detail: Option<String> },

    /// The remote service reported a failure.
    #[error("API error calling {function}{}{}", status_suffix(.status), detail_suffix(.detail))]
    Api { function: String, status: Option<u16>, detail: Option<String> },

    /// The request never produced a response (timeout, connection failure).
    #[error("Transport error calling {function}: {message}")]
    Transport { function: String, message: String },

    /// Malformed caller input, rejected before any network call.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A bulk operation exceeded the configured ceiling.
    #[error("Batch size {attempted} exceeds the configured maximum of {max}")]
    BatchSizeLimit { attempted: usize, max: usize },

    /// A security invariant could not be upheld.
    #[error("Security error: {message}{}{}", function_suffix(.function), ref_suffix(.user_ref))]
    Security { message: String, function: Option<String>, user_ref: Option<u64> },
}

impl AssetgateError {
    /// Shorthand for an [`Api`](Self::Api) error without status.
    pub fn api(function: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Api { function: function.into(), status: None, detail: Some(detail.into()) }
    }

    /// Shorthand for a [`Permission`](Self::Permission) error.
    pub fn permission(function: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Permission { function: function.into(), detail: Some(detail.into()) }
    }

    /// Shorthand for a [`Security`](Self::Security) error with no remote context.
    pub fn security(message: impl Into<String>) -> Self {
        Self::Security { message: message.into(), function: None, user_ref: None }
    }

    /// True for remote-side failures; permission errors are a kind of API error.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Permission { .. })
    }

    /// True for remote denials only.
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::Permission { .. })
    }

    /// Remote function the error originated from, where known.
    pub fn function(&self) -> Option<&str> {
        match self {
            Self::Permission { function, .. }
            | Self::Api { function, .. }
            | Self::Transport { function, .. } => Some(function),
            Self::Security { function, .. } => function.as_deref(),
            Self::Config(_) | Self::Validation(_) | Self::BatchSizeLimit { .. } => None,
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default()
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

fn function_suffix(function: &Option<String>) -> String {
    function.as_ref().map(|f| format!(" [function={f}]")).unwrap_or_default()
}

fn ref_suffix(user_ref: &Option<u64>) -> String {
    user_ref.map(|r| format!(" [user_ref={r}]")).unwrap_or_default()
}

/// Result type alias for Assetgate operations
pub type Result<T> = std::result::Result<T, AssetgateError>;
