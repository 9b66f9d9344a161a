//! Interview service job board client.
//!
//! The service aggregates postings from external job boards and tracks the
//! user's applications; this client wraps those endpoints.

use anyhow::{anyhow, Result};
use std::time::Duration;

use super::model::{JobApplication, JobFilter, JobPosting};
use crate::questions::api::{check_status, humanize};

/// Client for the interview service's job endpoints.
#[derive(Debug, Clone)]
pub struct JobClient {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl JobClient {
    pub fn new(base_url: &str, token: Option<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {e}"))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Fetches job recommendations matched to the user's profile.
    ///
    /// The service caps `limit` at 50.
    ///
    /// # Errors
    /// - If the request fails or the response cannot be parsed
    pub async fn get_recommendations(&self, limit: u32) -> Result<Vec<JobPosting>> {
        let url = format!("{}/jobs/recommendations", self.base_url);
        let request = self
            .client()?
            .get(&url)
            .query(&[("limit", limit.min(50).to_string())]);
        let response = self.authorize(request).send().await.map_err(humanize)?;

        let response = check_status(response).await?;
        let jobs: Vec<JobPosting> = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse job recommendations: {e}"))?;

        tracing::debug!("Fetched {} job recommendations", jobs.len());
        Ok(jobs)
    }

    /// Searches aggregated postings by keyword, location, and experience
    /// level.
    ///
    /// # Errors
    /// - If the request fails or the response cannot be parsed
    pub async fn search_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>> {
        let url = format!("{}/jobs/search", self.base_url);
        tracing::debug!("Searching jobs: {} {:?}", url, filter);

        let request = self.client()?.get(&url).query(&filter.to_query());
        let response = self.authorize(request).send().await.map_err(humanize)?;

        let response = check_status(response).await?;
        let jobs: Vec<JobPosting> = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse job search results: {e}"))?;

        tracing::debug!("Job search returned {} postings", jobs.len());
        Ok(jobs)
    }

    /// Submits an application for a posting.
    ///
    /// # Errors
    /// - If the request fails or the service rejects it
    pub async fn apply(&self, job_id: &str) -> Result<()> {
        let url = format!("{}/jobs/applications", self.base_url);
        let request = self.client()?.post(&url).query(&[("job_id", job_id)]);
        let response = self.authorize(request).send().await.map_err(humanize)?;

        check_status(response).await?;
        tracing::info!("Applied to job {}", job_id);
        Ok(())
    }

    /// Fetches the user's tracked applications.
    ///
    /// # Errors
    /// - If the request fails or the response cannot be parsed
    pub async fn get_applications(&self) -> Result<Vec<JobApplication>> {
        let url = format!("{}/jobs/applications", self.base_url);
        let request = self.client()?.get(&url);
        let response = self.authorize(request).send().await.map_err(humanize)?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse application list: {e}"))
    }

    /// Updates the status of one application.
    ///
    /// # Errors
    /// - If the request fails or the service rejects it
    pub async fn update_application_status(
        &self,
        application_id: &str,
        status: &str,
    ) -> Result<()> {
        let url = format!("{}/jobs/applications/{}", self.base_url, application_id);
        let request = self.client()?.put(&url).query(&[("status", status)]);
        let response = self.authorize(request).send().await.map_err(humanize)?;

        check_status(response).await?;
        tracing::info!("Application {} updated to '{}'", application_id, status);
        Ok(())
    }
}
