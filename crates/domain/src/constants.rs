//! Domain constants

/// Per-call timeout when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound accepted for the per-call timeout
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Bulk-operation ceiling when none is configured
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// Group assigned to accounts created through the provisioning workflow
pub const DEFAULT_SIGNUP_USERGROUP: u32 = 2;

/// Minimum length of the signing secret, in characters
pub const MIN_SECRET_CHARS: usize = 32;
