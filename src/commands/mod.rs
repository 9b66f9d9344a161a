//! Application command handlers for prept.
//!
//! This module organizes command handling into separate submodules, each responsible for a specific
//! application command (practice, catalog browsing, auth, history viewing).
//!
//! # Commands
//! - `practice`: Record and submit an answer for a practice question
//! - `questions`: Browse the question catalog and like questions
//! - `jobs`: Browse job postings, apply, and track applications
//! - `progress`: Show per-question practice progress
//! - `history`: Local answer and feedback history
//! - `auth`: Service URL and API token management
//! - `config`: Open configuration file in user's preferred editor
//! - `list_devices`: List available audio input devices
//! - `logs`: Display recent log entries

pub mod auth;
pub mod config;
pub mod history;
pub mod jobs;
pub mod list_devices;
pub mod logs;
pub mod practice;
pub mod progress;
pub mod questions;

pub use auth::handle_auth;
pub use config::handle_config;
pub use history::handle_history;
pub use jobs::{handle_applications, handle_apply, handle_jobs};
pub use list_devices::handle_list_devices;
pub use logs::handle_logs;
pub use practice::handle_practice;
pub use progress::handle_progress;
pub use questions::{handle_like, handle_questions};
