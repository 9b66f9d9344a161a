//! Browse the interview question catalog.

use console::style;

use crate::config::{self, PreptConfig};
use crate::questions::{QuestionClient, QuestionFilter};

/// Lists catalog questions matching the given filters.
///
/// # Errors
/// - If configuration cannot be loaded
/// - If the catalog fetch fails
pub async fn handle_questions(filter: QuestionFilter) -> Result<(), anyhow::Error> {
    tracing::info!("=== prept Question Catalog ===");

    let config_data = PreptConfig::load()?;
    let token = config::get_api_token().ok().flatten();
    let client = QuestionClient::new(
        &config_data.service.base_url,
        token,
        config_data.service.timeout_secs,
    );

    let questions = client.list_questions(&filter).await?;

    if questions.is_empty() {
        println!("No questions match the given filters.");
        return Ok(());
    }

    println!();
    for question in &questions {
        println!(
            "{}  {}",
            style(&question.id).dim(),
            style(&question.title).bold()
        );
        println!(
            "    {} / {}  ·  {} likes  ·  {} views",
            question.category, question.difficulty, question.likes, question.views
        );
        if !question.tags.is_empty() {
            println!("    tags: {}", question.tags.join(", "));
        }
        if !question.company_tags.is_empty() {
            println!("    companies: {}", question.company_tags.join(", "));
        }
        if let Some(created_at) = question.created_at {
            println!(
                "    {}",
                style(format!("added {}", created_at.format("%Y-%m-%d"))).dim()
            );
        }
        println!();
    }

    println!(
        "{}",
        style(format!(
            "Practice one with: prept practice <QUESTION_ID>  ({} shown)",
            questions.len()
        ))
        .dim()
    );

    Ok(())
}

/// Likes a question on the interview service.
///
/// # Errors
/// - If configuration cannot be loaded
/// - If the request fails
pub async fn handle_like(question_id: String) -> Result<(), anyhow::Error> {
    let config_data = PreptConfig::load()?;
    let token = config::get_api_token().ok().flatten();
    let client = QuestionClient::new(
        &config_data.service.base_url,
        token,
        config_data.service.timeout_secs,
    );

    client.like_question(&question_id).await?;
    println!("Question liked: {question_id}");
    Ok(())
}
