//! Secure storage of interview service credentials.
//!
//! The API token lives outside the main config file, in the user's local
//! data directory with owner-only permissions, so editing or sharing the
//! config never exposes it.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Credentials {
    #[serde(default)]
    api_token: Option<String>,
}

/// Returns the stored API token, if any.
///
/// # Errors
/// - If the credentials file exists but cannot be read or parsed
pub fn get_api_token() -> Result<Option<String>> {
    let path = credentials_path()?;
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let credentials: Credentials = toml::from_str(&content)
        .map_err(|e| anyhow!("Malformed credentials file {}: {e}", path.display()))?;
    Ok(credentials.api_token.filter(|t| !t.is_empty()))
}

/// Saves the API token, creating the credentials file with restricted
/// permissions.
///
/// # Errors
/// - If the data directory cannot be created
/// - If the file cannot be written
pub fn save_api_token(token: &str) -> Result<()> {
    let path = credentials_path()?;
    let credentials = Credentials {
        api_token: Some(token.to_string()),
    };
    let content = toml::to_string_pretty(&credentials)?;
    fs::write(&path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
    }

    tracing::info!("API token saved");
    Ok(())
}

/// Path to the credentials file, creating the data directory if needed.
fn credentials_path() -> Result<PathBuf> {
    let data_dir = dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not determine home directory"))?
        .join(".local")
        .join("share")
        .join("prept");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir.join("credentials.toml"))
}
