//! Answer submission payload and validity guard.

use thiserror::Error;

use crate::recording::FinalizedAudio;

/// Failures building or sending an answer submission.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Neither text nor recorded audio is present. Enforced caller-side;
    /// never reaches the interview service.
    #[error("answer must include text or recorded audio")]
    InvalidSubmission,
    /// Network or service error during submit. Recoverable by user retry;
    /// no partial submission state is retained.
    #[error("submitting answer failed: {0}")]
    SubmissionFailed(String),
}

/// One combined answer for a practice question, built at submit time and
/// discarded once the request completes.
///
/// Construction normalizes the optional parts: whitespace-only text and
/// empty audio artifacts count as absent.
#[derive(Debug, Clone)]
pub struct AnswerSubmission {
    pub question_id: String,
    pub answer_text: Option<String>,
    pub audio: Option<FinalizedAudio>,
}

impl AnswerSubmission {
    pub fn new(question_id: &str, answer_text: &str, audio: Option<&FinalizedAudio>) -> Self {
        let trimmed = answer_text.trim();
        let answer_text = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };

        let audio = audio.filter(|a| !a.is_empty()).cloned();

        Self {
            question_id: question_id.to_string(),
            answer_text,
            audio,
        }
    }

    /// True when the submission carries at least one of text or audio.
    pub fn has_content(&self) -> bool {
        self.answer_text.is_some() || self.audio.is_some()
    }

    /// Guard checked before any request is issued.
    ///
    /// # Errors
    /// - `InvalidSubmission` if both text and audio are absent
    pub fn validate(&self) -> Result<(), SubmissionError> {
        if self.has_content() {
            Ok(())
        } else {
            Err(SubmissionError::InvalidSubmission)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingSession;

    fn recorded_audio(samples: &[i16]) -> FinalizedAudio {
        let mut session = RecordingSession::new();
        session.begin(16_000);
        session.push_chunk(samples);
        session.finalize();
        session.finalized_audio().unwrap().clone()
    }

    #[test]
    fn empty_submission_is_rejected() {
        let submission = AnswerSubmission::new("q-1", "", None);
        assert!(!submission.has_content());
        assert!(matches!(
            submission.validate(),
            Err(SubmissionError::InvalidSubmission)
        ));
    }

    #[test]
    fn whitespace_only_text_counts_as_absent() {
        let submission = AnswerSubmission::new("q-1", "   \n\t", None);
        assert!(submission.answer_text.is_none());
        assert!(submission.validate().is_err());
    }

    #[test]
    fn empty_audio_artifact_counts_as_absent() {
        let empty = recorded_audio(&[]);
        let submission = AnswerSubmission::new("q-1", "", Some(&empty));
        assert!(submission.audio.is_none());
        assert!(submission.validate().is_err());
    }

    #[test]
    fn text_only_submission_is_valid() {
        let submission = AnswerSubmission::new("q-1", "binary search explanation", None);
        assert!(submission.validate().is_ok());
        assert_eq!(
            submission.answer_text.as_deref(),
            Some("binary search explanation")
        );
        assert!(submission.audio.is_none());
    }

    #[test]
    fn audio_only_submission_is_valid() {
        let audio = recorded_audio(&[1, 2, 3]);
        let submission = AnswerSubmission::new("q-1", "", Some(&audio));
        assert!(submission.validate().is_ok());
        assert!(submission.answer_text.is_none());
        assert_eq!(submission.audio.as_ref().unwrap().samples(), &[1, 2, 3]);
    }

    #[test]
    fn building_a_submission_does_not_touch_the_session() {
        use crate::recording::SessionState;

        let mut session = RecordingSession::new();
        session.begin(16_000);
        session.push_chunk(&[5, 6]);
        session.finalize();

        // The flow clones out of the session; discarding the submission
        // after a failed request leaves everything in place for retry
        let submission = AnswerSubmission::new("q-1", "draft answer", session.finalized_audio());
        drop(submission);

        assert_eq!(session.state(), SessionState::Stopped);
        assert_eq!(session.finalized_audio().unwrap().samples(), &[5, 6]);
    }

    #[test]
    fn text_is_trimmed_not_rewritten() {
        let submission = AnswerSubmission::new("q-1", "  an answer  ", None);
        assert_eq!(submission.answer_text.as_deref(), Some("an answer"));
    }
}
