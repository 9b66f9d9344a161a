//! Show per-question practice progress from the interview service.

use console::style;

use crate::config::{self, PreptConfig};
use crate::questions::QuestionClient;

/// Displays the authenticated user's practice progress.
///
/// # Errors
/// - If configuration cannot be loaded
/// - If the progress fetch fails
pub async fn handle_progress() -> Result<(), anyhow::Error> {
    tracing::info!("=== prept Progress ===");

    let config_data = PreptConfig::load()?;
    let token = config::get_api_token().ok().flatten();
    let client = QuestionClient::new(
        &config_data.service.base_url,
        token,
        config_data.service.timeout_secs,
    );

    let progress = client.get_progress().await?;

    if progress.is_empty() {
        println!("No practice progress yet. Try 'prept practice' to get started.");
        return Ok(());
    }

    println!();
    for entry in &progress {
        let status = match entry.status.as_str() {
            "completed" => style(entry.status.clone()).green(),
            "in_progress" => style(entry.status.clone()).yellow(),
            _ => style(entry.status.clone()).dim(),
        };
        let last_attempt = entry
            .last_attempt_date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "{}  {}  {} attempts  last: {}",
            style(&entry.question_id).dim(),
            status,
            entry.attempts,
            last_attempt
        );
    }

    Ok(())
}
