//! Answer submission flow for prept.
//!
//! Packages the optional recorded audio and optional typed text for a
//! question into a single multipart request to the interview service, and
//! surfaces the feedback the service returns.

pub mod answer;
pub mod api;

pub use answer::{AnswerSubmission, SubmissionError};
pub use api::{AnswerClient, Feedback};
