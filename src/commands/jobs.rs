//! Browse job postings and track applications.

use console::style;

use crate::config::{self, PreptConfig};
use crate::jobs::{JobClient, JobFilter};

/// Lists job postings: personalized recommendations by default, a board
/// search when any criteria are given.
///
/// # Errors
/// - If configuration cannot be loaded
/// - If the fetch fails
pub async fn handle_jobs(filter: JobFilter) -> Result<(), anyhow::Error> {
    tracing::info!("=== prept Job Board ===");

    let config_data = PreptConfig::load()?;
    let token = config::get_api_token().ok().flatten();
    let client = JobClient::new(
        &config_data.service.base_url,
        token,
        config_data.service.timeout_secs,
    );

    let jobs = if filter.is_empty() {
        client
            .get_recommendations(filter.limit.unwrap_or(10))
            .await?
    } else {
        client.search_jobs(&filter).await?
    };

    if jobs.is_empty() {
        println!("No job postings found. Try broader keywords or no filters at all.");
        return Ok(());
    }

    println!();
    for job in &jobs {
        println!(
            "{}  {}",
            style(&job.id).dim(),
            style(&job.title).bold()
        );
        println!("    {}  ·  {}  ·  via {}", job.company, job.location, job.source);
        let summary = job.description.lines().next().unwrap_or_default();
        if !summary.is_empty() {
            println!("    {summary}");
        }
        if !job.requirements.is_empty() {
            println!("    requirements: {}", job.requirements.join(", "));
        }
        if !job.experience_level.is_empty() {
            println!("    level: {}", job.experience_level);
        }
        if let Some(salary_range) = &job.salary_range {
            println!("    salary: {salary_range}");
        }
        if !job.skills_required.is_empty() {
            println!("    skills: {}", job.skills_required.join(", "));
        }
        if let Some(posted_date) = job.posted_date {
            println!(
                "    {}",
                style(format!("posted {}", posted_date.format("%Y-%m-%d"))).dim()
            );
        }
        println!("    {}", style(&job.posting_url).dim());
        println!();
    }

    println!(
        "{}",
        style(format!(
            "Apply with: prept apply <JOB_ID>  ({} shown)",
            jobs.len()
        ))
        .dim()
    );

    Ok(())
}

/// Submits an application for a job posting.
///
/// # Errors
/// - If configuration cannot be loaded
/// - If the request fails
pub async fn handle_apply(job_id: String) -> Result<(), anyhow::Error> {
    let config_data = PreptConfig::load()?;
    let token = config::get_api_token().ok().flatten();
    let client = JobClient::new(
        &config_data.service.base_url,
        token,
        config_data.service.timeout_secs,
    );

    client.apply(&job_id).await?;
    println!("Application submitted: {job_id}");
    Ok(())
}

/// Lists tracked applications, or updates one when a new status is given.
///
/// # Errors
/// - If configuration cannot be loaded
/// - If the request fails
pub async fn handle_applications(
    update: Option<String>,
    status: Option<String>,
) -> Result<(), anyhow::Error> {
    tracing::info!("=== prept Applications ===");

    let config_data = PreptConfig::load()?;
    let token = config::get_api_token().ok().flatten();
    let client = JobClient::new(
        &config_data.service.base_url,
        token,
        config_data.service.timeout_secs,
    );

    if let Some(application_id) = update {
        let status = status
            .ok_or_else(|| anyhow::anyhow!("--status is required when updating an application"))?;
        client
            .update_application_status(&application_id, &status)
            .await?;
        println!("Application {application_id} marked '{status}'");
        return Ok(());
    }

    let applications = client.get_applications().await?;

    if applications.is_empty() {
        println!("No applications yet. Try 'prept jobs' to find postings.");
        return Ok(());
    }

    println!();
    for application in &applications {
        let status = match application.status.as_str() {
            "offer" => style(application.status.clone()).green(),
            "interviewing" => style(application.status.clone()).yellow(),
            "rejected" => style(application.status.clone()).red(),
            _ => style(application.status.clone()).dim(),
        };
        let applied = application
            .applied_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string());

        println!(
            "{}  {}  applied {}  (job {})",
            style(&application.id).dim(),
            status,
            applied,
            application.job_id
        );
        if let Some(last_updated) = application.last_updated {
            println!(
                "    {}",
                style(format!("updated {}", last_updated.format("%Y-%m-%d %H:%M"))).dim()
            );
        }
    }

    Ok(())
}
