//! Configuration management for prept.
//!
//! This module handles loading and saving application configuration from TOML files,
//! as well as secure storage of the interview service API token. Configuration is
//! stored in the user's config directory, while credentials are stored with
//! restricted permissions in the user's local data directory.

pub mod file;
pub mod secrets;

pub use file::{get_config_path, AudioConfig, PreptConfig, ServiceConfig};
pub use secrets::{get_api_token, save_api_token};
