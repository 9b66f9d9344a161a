//! prept: terminal interview practice recorder.
//!
//! Record spoken answers to practice questions, optionally add a written
//! answer, and submit to an interview service for feedback.

mod app;
mod commands;
mod config;
mod history;
mod jobs;
mod logging;
mod questions;
mod recording;
mod submission;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(e) = app::run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
