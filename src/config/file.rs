//! Configuration file management for prept.
//!
//! This module handles loading and saving application configuration from TOML files.
//! Configuration is stored in the user's config directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Audio recording configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Audio device to use. Options:
    /// - "default" for system default device
    /// - numeric index (0, 1, 2, etc.) from `prept list-devices`
    /// - device name from `prept list-devices`
    #[serde(default = "default_device")]
    pub device: String,
    /// Requested sample rate in Hz (the device's native rate takes precedence)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_device() -> String {
    "default".to_string()
}

fn default_sample_rate() -> u32 {
    16000
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            sample_rate: default_sample_rate(),
        }
    }
}

/// Interview service connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the interview service API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds for submissions and catalog fetches
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreptConfig {
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

impl PreptConfig {
    /// Loads configuration from the user's config directory, writing the
    /// defaults first if no config file exists yet.
    ///
    /// # Errors
    /// - If the config directory cannot be determined or created
    /// - If the config file cannot be read or written
    /// - If the TOML is malformed
    pub fn load() -> anyhow::Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            let config = PreptConfig::default();
            config.save()?;
            tracing::info!("Default configuration written to {}", config_path.display());
            return Ok(config);
        }

        let config_content = fs::read_to_string(&config_path)?;
        let config: PreptConfig = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Saves configuration to the user's config directory.
    ///
    /// # Errors
    /// - If the config directory cannot be determined or created
    /// - If the file cannot be written
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = get_config_path()?;
        let config_content = toml::to_string_pretty(self)?;
        fs::write(&config_path, config_content)?;
        tracing::info!("Configuration saved");
        Ok(())
    }
}

/// Retrieves the path to the config file, creating the config directory if needed.
///
/// # Errors
/// - If the home directory cannot be determined
/// - If the config directory cannot be created
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let config_dir = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not find home directory",
        )
    })?;
    let config_path = config_dir.join(".config").join("prept").join("prept.toml");

    std::fs::create_dir_all(config_path.parent().unwrap())?;

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_falls_back_to_defaults() {
        let config: PreptConfig = toml::from_str("").unwrap();
        assert_eq!(config.audio.device, "default");
        assert_eq!(config.audio.sample_rate, 16000);
        assert_eq!(config.service.base_url, "http://localhost:8000");
        assert_eq!(config.service.timeout_secs, 60);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: PreptConfig = toml::from_str(
            r#"
            [service]
            base_url = "https://api.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.service.base_url, "https://api.example.com");
        assert_eq!(config.service.timeout_secs, 60);
        assert_eq!(config.audio.device, "default");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = PreptConfig {
            audio: AudioConfig {
                device: "1".to_string(),
                sample_rate: 48000,
            },
            service: ServiceConfig {
                base_url: "https://api.example.com".to_string(),
                timeout_secs: 30,
            },
        };
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: PreptConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.audio.device, "1");
        assert_eq!(parsed.audio.sample_rate, 48000);
        assert_eq!(parsed.service.timeout_secs, 30);
    }
}
