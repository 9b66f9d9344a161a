//! Job recommendations, search, and application tracking.
//!
//! Models and client for the interview service's job board endpoints:
//! personalized recommendations, keyword search across aggregated postings,
//! and the user's application pipeline.

pub mod api;
pub mod model;

pub use api::JobClient;
pub use model::{JobApplication, JobFilter, JobPosting};
