//! Configuration loading
//!
//! Provides utilities for loading client configuration from environment
//! variables, `.env` files and JSON/TOML config files.

pub mod loader;

pub use loader::{load, load_dotenv, load_from_env, load_from_file, probe_config_paths};
