//! Interview service question catalog client.

use anyhow::{anyhow, Result};
use std::time::Duration;

use super::model::{Question, QuestionFilter, QuestionProgress};

/// Client for the interview service's question and progress endpoints.
#[derive(Debug, Clone)]
pub struct QuestionClient {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl QuestionClient {
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

    /// Fetches questions matching the filter.
    ///
    /// # Errors
    /// - If the request fails due to network issues
    /// - If the service returns a non-2xx status
    /// - If the response cannot be parsed
    pub async fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>> {
        let url = format!("{}/interview/questions", self.base_url);
        tracing::debug!("Fetching questions: {} {:?}", url, filter);

        let request = self.client()?.get(&url).query(&filter.to_query());
        let response = self.authorize(request).send().await.map_err(humanize)?;

        let response = check_status(response).await?;
        let questions: Vec<Question> = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse question list: {e}"))?;

        tracing::debug!("Fetched {} questions", questions.len());
        Ok(questions)
    }

    /// Fetches one question by id.
    ///
    /// The service exposes list-with-filters only, so this fetches the
    /// catalog and selects by id.
    ///
    /// # Errors
    /// - If the fetch fails
    /// - If no question with the given id exists
    pub async fn get_question(&self, question_id: &str) -> Result<Question> {
        let questions = self.list_questions(&QuestionFilter {
            limit: Some(50),
            ..Default::default()
        })
        .await?;

        questions
            .into_iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| anyhow!("Question '{question_id}' not found on the interview service"))
    }

    /// Fetches the authenticated user's per-question progress.
    ///
    /// # Errors
    /// - If the request fails or the response cannot be parsed
    pub async fn get_progress(&self) -> Result<Vec<QuestionProgress>> {
        let url = format!("{}/interview/progress", self.base_url);
        let request = self.client()?.get(&url);
        let response = self.authorize(request).send().await.map_err(humanize)?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse progress list: {e}"))
    }

    /// Likes a question.
    ///
    /// # Errors
    /// - If the request fails or the service rejects it
    pub async fn like_question(&self, question_id: &str) -> Result<()> {
        let url = format!(
            "{}/interview/questions/{}/like",
            self.base_url, question_id
        );
        let request = self.client()?.post(&url);
        let response = self.authorize(request).send().await.map_err(humanize)?;

        check_status(response).await?;
        tracing::info!("Liked question {}", question_id);
        Ok(())
    }
}

/// Maps reqwest transport errors to human-readable messages. Shared with
/// the job board client.
pub(crate) fn humanize(e: reqwest::Error) -> anyhow::Error {
    if e.is_connect() {
        anyhow!("Failed to connect to the interview service. Check your internet connection and the configured base_url.")
    } else if e.is_timeout() {
        anyhow!("Request to the interview service timed out. The server is not responding.")
    } else {
        anyhow!("Interview service network error: {e}")
    }
}

/// Returns the response unchanged on 2xx, a human-readable error otherwise.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    let human_readable = match status.as_u16() {
        401 => "The interview service rejected your credentials. Run 'prept auth' to update your API token.".to_string(),
        404 => "Not found on the interview service.".to_string(),
        429 => "Too many requests to the interview service. Please wait and try again.".to_string(),
        500 | 502 | 503 | 504 => "The interview service is experiencing issues. Please try again later.".to_string(),
        _ => format!("Interview service error (status {status}): {error_body}"),
    };

    Err(anyhow!(human_readable))
}
