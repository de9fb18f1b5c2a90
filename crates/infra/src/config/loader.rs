//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from a probed config file
//! 3. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ASSETGATE_BASE_URL`: Public base address (required)
//! - `ASSETGATE_USER`: Principal the requests are signed for (required)
//! - `ASSETGATE_SECRET` or `ASSETGATE_KEY`: Signing secret (required)
//! - `ASSETGATE_INTERNAL_URL`: Internal base address
//! - `ASSETGATE_AUTH_MODE`: `apikey` or `sessionkey`
//! - `ASSETGATE_TIMEOUT_SECS`: Per-call timeout in seconds
//! - `ASSETGATE_MAX_BATCH_SIZE`: Ceiling for bulk operations
//! - `ASSETGATE_SIGNUP_USERGROUP`: Group assigned to provisioned users
//!
//! ## File Locations
//! The loader probes `assetgate.toml` then `assetgate.json`, first in the
//! current working directory and then next to the executable.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use assetgate_domain::{AssetgateError, AuthMode, ClientConfig, ClientConfigBuilder, Result};

pub const ENV_BASE_URL: &str = "ASSETGATE_BASE_URL";
pub const ENV_USER: &str = "ASSETGATE_USER";
pub const ENV_SECRET: &str = "ASSETGATE_SECRET";
pub const ENV_KEY: &str = "ASSETGATE_KEY";
pub const ENV_INTERNAL_URL: &str = "ASSETGATE_INTERNAL_URL";
pub const ENV_AUTH_MODE: &str = "ASSETGATE_AUTH_MODE";
pub const ENV_TIMEOUT_SECS: &str = "ASSETGATE_TIMEOUT_SECS";
pub const ENV_MAX_BATCH_SIZE: &str = "ASSETGATE_MAX_BATCH_SIZE";
pub const ENV_SIGNUP_USERGROUP: &str = "ASSETGATE_SIGNUP_USERGROUP";

const CONFIG_FILE_NAMES: [&str; 2] = ["assetgate.toml", "assetgate.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variable is missing or invalid, falls back to the first config file found
/// by [`probe_config_paths`]. Returns `None` when neither source yields a
/// valid configuration.
pub fn load() -> Option<ClientConfig> {
    if let Some(config) = load_from_env() {
        tracing::info!("Configuration loaded from environment variables");
        return Some(config);
    }

    let path = probe_config_paths()?;
    match load_from_file(&path) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
            None
        }
    }
}

/// Load a `.env` file from the current directory or its parents into the
/// process environment. Variables that are already set win.
///
/// Returns the path of the file that was loaded.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Some(path)
        }
        Err(e) => {
            tracing::debug!(error = %e, "No .env file loaded");
            None
        }
    }
}

/// Load configuration from environment variables
///
/// Never fails: a missing required variable is logged at `debug`, an
/// invalid value at `warn`, and both yield `None`.
pub fn load_from_env() -> Option<ClientConfig> {
    let base_url = env_var(ENV_BASE_URL);
    let user = env_var(ENV_USER);
    let secret = env_var(ENV_SECRET).or_else(|| env_var(ENV_KEY));

    let (Some(base_url), Some(user), Some(secret)) = (base_url, user, secret) else {
        tracing::debug!(
            required = ?[ENV_BASE_URL, ENV_USER, ENV_SECRET],
            "Required environment variables missing"
        );
        return None;
    };

    match env_builder(base_url, user, secret).and_then(ClientConfigBuilder::build) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(error = %e, "Environment configuration rejected");
            None
        }
    }
}

fn env_builder(base_url: String, user: String, secret: String) -> Result<ClientConfigBuilder> {
    let mut builder = ClientConfig::builder().base_url(base_url).user(user).secret(secret);

    if let Some(internal) = env_var(ENV_INTERNAL_URL) {
        builder = builder.internal_url(internal);
    }
    if let Some(mode) = env_parsed::<AuthMode>(ENV_AUTH_MODE)? {
        builder = builder.auth_mode(mode);
    }
    if let Some(secs) = env_parsed::<u64>(ENV_TIMEOUT_SECS)? {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(size) = env_parsed::<usize>(ENV_MAX_BATCH_SIZE)? {
        builder = builder.max_batch_size(size);
    }
    if let Some(group) = env_parsed::<u32>(ENV_SIGNUP_USERGROUP)? {
        builder = builder.signup_usergroup(group);
    }

    Ok(builder)
}

/// Load configuration from a file
///
/// Format is detected by extension (`.json` or `.toml`). The file goes
/// through the same validation as programmatic configuration.
///
/// # Errors
/// Returns `AssetgateError::Config` if:
/// - The file does not exist or cannot be read
/// - The format is unsupported or invalid
/// - A required field is missing or a value is out of range
pub fn load_from_file(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AssetgateError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| AssetgateError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)?.build()
}

fn parse_config(contents: &str, path: &Path) -> Result<ClientConfigBuilder> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AssetgateError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AssetgateError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(AssetgateError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a config file
///
/// Returns the first existing candidate, or `None`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Non-empty environment variable
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parsed<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    env_var(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AssetgateError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}
