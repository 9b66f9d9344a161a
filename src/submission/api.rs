//! Interview service answer endpoint client.
//!
//! Sends one multipart request per submission and parses the feedback the
//! service returns. No automatic retry: a failed submit surfaces as
//! `SubmissionFailed` and leaves the session and typed answer untouched so
//! the user can retry.

use serde::Deserialize;
use std::time::Duration;

use super::answer::{AnswerSubmission, SubmissionError};
use crate::recording::FinalizedAudio;

/// Feedback returned by the interview service for a submitted answer.
///
/// `feedback` is the only required field and is treated as opaque text. The
/// remaining fields come from the service's keyword analysis and are shown
/// when present.
#[derive(Debug, Clone, Deserialize)]
pub struct Feedback {
    pub feedback: String,
    /// Keyword coverage score in 0..=1
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub keywords_mentioned: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
}

/// Client for the interview service's answer endpoint.
#[derive(Debug, Clone)]
pub struct AnswerClient {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl AnswerClient {
    pub fn new(base_url: &str, token: Option<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Submits one answer and returns the service's feedback.
    ///
    /// Issues a single `POST {base}/interview/answers` with a multipart body:
    /// `question_id` (text), `answer_text` (text, optional) and `audio`
    /// (WAV bytes, optional). Does not mutate the recording session.
    ///
    /// # Errors
    /// - `InvalidSubmission` if the guard fails (neither text nor audio)
    /// - `SubmissionFailed` on network errors, non-2xx responses, or an
    ///   unparseable response body
    pub async fn submit_answer(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<Feedback, SubmissionError> {
        submission.validate()?;

        let url = format!("{}/interview/answers", self.base_url);

        let mut form = reqwest::multipart::Form::new()
            .text("question_id", submission.question_id.clone());

        if let Some(text) = &submission.answer_text {
            form = form.text("answer_text", text.clone());
        }

        if let Some(audio) = &submission.audio {
            let wav_bytes = audio.to_wav_bytes().map_err(|e| {
                SubmissionError::SubmissionFailed(format!("Failed to encode recorded audio: {e}"))
            })?;
            let audio_part = reqwest::multipart::Part::bytes(wav_bytes)
                .file_name(FinalizedAudio::FILE_NAME)
                .mime_str(FinalizedAudio::MIME)
                .map_err(|e| {
                    SubmissionError::SubmissionFailed(format!(
                        "Failed to create audio part for upload: {e}"
                    ))
                })?;
            form = form.part("audio", audio_part);
        }

        tracing::debug!(
            "Submitting answer: question_id={}, text={}, audio={}",
            submission.question_id,
            submission.answer_text.is_some(),
            submission.audio.is_some()
        );

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                SubmissionError::SubmissionFailed(format!("Failed to build HTTP client: {e}"))
            })?;

        let mut request = client.post(&url).multipart(form);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let error_msg = if e.is_connect() {
                    "Failed to connect to the interview service. Check your internet connection and the configured base_url.".to_string()
                } else if e.is_timeout() {
                    "Request to the interview service timed out. The server is not responding."
                        .to_string()
                } else {
                    format!("Interview service network error: {e}")
                };
                return Err(SubmissionError::SubmissionFailed(error_msg));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SubmissionError::SubmissionFailed(humanize_status(
                status.as_u16(),
                &error_body,
            )));
        }

        let body = response.text().await.map_err(|e| {
            SubmissionError::SubmissionFailed(format!(
                "Failed to read interview service response: {e}"
            ))
        })?;

        let feedback = parse_feedback(&body)?;

        tracing::debug!(
            "Feedback received: {} characters, score={:?}",
            feedback.feedback.len(),
            feedback.score
        );

        Ok(feedback)
    }
}

/// Maps an HTTP error status to a human-readable message.
fn humanize_status(status: u16, error_body: &str) -> String {
    match status {
        401 => "The interview service rejected your credentials. Run 'prept auth' to update your API token.".to_string(),
        403 => "You don't have permission to submit answers. Check your API token and account status.".to_string(),
        404 => "Question not found on the interview service. It may have been removed.".to_string(),
        429 => "Too many requests to the interview service. You've hit the rate limit. Please wait and try again.".to_string(),
        500 | 502 | 503 | 504 => "The interview service is experiencing issues. Please try again later.".to_string(),
        _ => format!("Interview service error (status {status}): {error_body}"),
    }
}

/// Parses the feedback JSON body.
fn parse_feedback(body: &str) -> Result<Feedback, SubmissionError> {
    serde_json::from_str(body).map_err(|e| {
        SubmissionError::SubmissionFailed(format!(
            "Failed to parse interview service response: {e}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_string_is_surfaced_exactly() {
        let feedback =
            parse_feedback(r#"{"feedback": "Good structure, mention time complexity."}"#).unwrap();
        assert_eq!(feedback.feedback, "Good structure, mention time complexity.");
        assert_eq!(feedback.score, None);
        assert!(feedback.keywords_mentioned.is_empty());
        assert!(feedback.missing_keywords.is_empty());
    }

    #[test]
    fn keyword_analysis_fields_are_optional() {
        let body = r#"{
            "feedback": "Excellent response! You covered most of the key points.",
            "score": 0.8,
            "keywords_mentioned": ["binary search"],
            "missing_keywords": ["time complexity"]
        }"#;
        let feedback = parse_feedback(body).unwrap();
        assert_eq!(feedback.score, Some(0.8));
        assert_eq!(feedback.keywords_mentioned, vec!["binary search"]);
        assert_eq!(feedback.missing_keywords, vec!["time complexity"]);
    }

    #[test]
    fn missing_feedback_field_is_an_error() {
        let err = parse_feedback(r#"{"score": 0.5}"#).unwrap_err();
        assert!(matches!(err, SubmissionError::SubmissionFailed(_)));
    }

    #[test]
    fn error_statuses_map_to_human_messages() {
        assert!(humanize_status(401, "").contains("prept auth"));
        assert!(humanize_status(404, "").contains("Question not found"));
        assert!(humanize_status(503, "").contains("try again later"));
        assert!(humanize_status(418, "teapot").contains("418"));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = AnswerClient::new("https://api.example.com/", None, 30);
        assert_eq!(client.base_url, "https://api.example.com");
    }
}
