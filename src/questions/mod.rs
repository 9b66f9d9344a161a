//! Interview question catalog and practice progress.
//!
//! Models and client for the interview service's question endpoints:
//! filtered catalog listing, per-user progress, and likes.

pub mod api;
pub mod model;

pub use api::QuestionClient;
pub use model::{Question, QuestionFilter, QuestionProgress};
