//! Interview service authentication.
//!
//! Configures the service base URL and API token in one flow. Users can keep
//! an existing token by pressing Enter without entering anything.

use cliclack::{input, intro, note, outro, password};
use console::style;

use crate::config::{self, PreptConfig};

/// Handles service URL and API token configuration.
///
/// # Errors
/// - If configuration cannot be loaded or saved
/// - If a prompt is cancelled
pub async fn handle_auth() -> Result<(), anyhow::Error> {
    tracing::info!("=== prept Authentication ===");

    ctrlc::set_handler(move || {}).expect("setting Ctrl-C handler");

    println!("\n ┏┓┏┓┏┓┏┓╋\n ┣┛┛ ┗ ┣┛┗\n");

    intro(style(" auth ").on_white().black())?;

    let mut config_data = PreptConfig::load()?;

    note("current service", &config_data.service.base_url)?;

    let base_url: String = input("Interview service base URL:")
        .default_input(&config_data.service.base_url)
        .interact()
        .map_err(|e| anyhow::anyhow!("URL input cancelled: {e}"))?;

    let current_token = config::get_api_token().ok().flatten();

    let token = if current_token.is_some() {
        password("Enter API token (press Enter to keep current):")
            .allow_empty()
            .interact()
            .map_err(|e| anyhow::anyhow!("Token input cancelled: {e}"))?
    } else {
        password("Enter API token:")
            .interact()
            .map_err(|e| anyhow::anyhow!("Token input cancelled: {e}"))?
    };

    // Empty input keeps the current token when one exists
    let token_to_save = if token.is_empty() {
        match current_token {
            Some(token) => token,
            None => return Err(anyhow::anyhow!("API token cannot be empty")),
        }
    } else {
        token
    };

    config_data.service.base_url = base_url.trim_end_matches('/').to_string();
    config_data.save()?;
    config::save_api_token(&token_to_save)?;

    outro("✅ Configuration saved.")?;

    tracing::info!(
        "Authentication completed: service={}",
        config_data.service.base_url
    );

    Ok(())
}
