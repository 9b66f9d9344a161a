//! Answer history viewer.
//!
//! Lists previously submitted answers and the feedback they received.

use console::style;

use crate::history::HistoryManager;

/// Displays the local answer history, most recent first.
///
/// # Arguments
/// * `limit` - Maximum number of entries to show
///
/// # Errors
/// - If the data directory cannot be determined
/// - If the history database cannot be read
pub async fn handle_history(limit: usize) -> Result<(), anyhow::Error> {
    tracing::info!("=== prept History Viewer ===");

    let data_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
        .join(".local")
        .join("share")
        .join("prept");

    let mut history_manager = HistoryManager::new(&data_dir)?;
    let entries = history_manager.get_all_answers()?;

    if entries.is_empty() {
        println!("No answer history found. Try 'prept practice' to get started.");
        return Ok(());
    }

    println!();
    for entry in entries.iter().take(limit) {
        let parts = match (entry.answer_text.is_some(), entry.had_audio) {
            (true, true) => "text + audio",
            (true, false) => "text",
            (false, true) => "audio",
            (false, false) => "empty",
        };

        println!(
            "{} {}  {}  ({})",
            style(format!("#{}", entry.id)).dim(),
            style(entry.created_at.format("%Y-%m-%d %H:%M").to_string()).dim(),
            style(&entry.question_title).bold(),
            parts
        );
        println!("    {}", style(&entry.question_id).dim());
        if let Some(score) = entry.score {
            println!("    score: {:.0}%", score * 100.0);
        }
        println!("    {}", entry.feedback);
        println!();
    }

    if entries.len() > limit {
        println!(
            "{}",
            style(format!("({} older entries not shown)", entries.len() - limit)).dim()
        );
    }

    Ok(())
}
