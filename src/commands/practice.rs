//! Practice a question: record a spoken answer, optionally type text, submit
//! for feedback.
//!
//! Runs the practice TUI loop: the capture controller drives the recording
//! session while the view shows the question, the elapsed-time counter, and
//! the text-answer field. Submission packages the finalized audio and typed
//! text into one multipart request and displays the returned feedback.

use console::style;

use crate::config::{self, PreptConfig};
use crate::history::HistoryManager;
use crate::questions::{Question, QuestionClient, QuestionFilter};
use crate::recording::{self, CaptureController};
use crate::submission::{AnswerClient, AnswerSubmission, Feedback};
use crate::ui::{ErrorScreen, PracticeCommand, PracticeTui, SessionView};

/// Handles one practice run for a question.
///
/// # Arguments
/// * `question_id` - Question to practice; picks one from the catalog when absent
/// * `category` / `difficulty` - Catalog filters used when no id is given
pub async fn handle_practice(
    question_id: Option<String>,
    category: Option<String>,
    difficulty: Option<String>,
) -> Result<(), anyhow::Error> {
    tracing::info!("=== prept Practice Session Started ===");

    let config_data = match PreptConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Failed to load configuration: {err}");
            let error_message = format!(
                "Configuration Error:\n\n{err}\n\nPlease check your ~/.config/prept/prept.toml file and try again."
            );
            let mut error_screen = ErrorScreen::new()?;
            error_screen.show_error(&error_message)?;
            error_screen.cleanup()?;
            return Err(anyhow::anyhow!("Configuration error: {err}"));
        }
    };

    tracing::info!(
        "Configuration loaded: device={}, sample_rate={}Hz, service={}",
        config_data.audio.device,
        config_data.audio.sample_rate,
        config_data.service.base_url
    );

    let token = config::get_api_token().ok().flatten();

    let question = match fetch_question(&config_data, token.clone(), question_id, category, difficulty)
        .await
    {
        Ok(question) => question,
        Err(e) => {
            tracing::error!("Failed to fetch question: {e}");
            let mut error_screen = ErrorScreen::new()?;
            error_screen.show_error(&format!("Question Fetch Error:\n\n{e}"))?;
            error_screen.cleanup()?;
            return Err(e);
        }
    };

    tracing::info!("Practicing question '{}' ({})", question.title, question.id);

    let mut controller = CaptureController::new(
        config_data.audio.sample_rate,
        config_data.audio.device.clone(),
    );
    let session = controller.session();

    let mut tui = PracticeTui::new(&question)
        .map_err(|e| anyhow::anyhow!("Failed to initialize UI: {e}"))?;

    let outcome = run_practice_loop(
        &mut tui,
        &mut controller,
        &session,
        &question,
        &config_data,
        token,
    )
    .await;

    // Stop before leaving the alternate screen so the device is always
    // released, then surface whatever the loop produced
    controller.stop_recording();
    tui.cleanup()
        .map_err(|e| anyhow::anyhow!("Cleanup failed: {e}"))?;

    match outcome? {
        Some(feedback) => {
            print_feedback(&question, &feedback);
            tracing::info!("=== prept Practice Session Completed ===");
        }
        None => {
            tracing::info!("=== prept Practice Session Cancelled ===");
        }
    }

    Ok(())
}

/// Resolves the question to practice, by id or from the filtered catalog.
async fn fetch_question(
    config_data: &PreptConfig,
    token: Option<String>,
    question_id: Option<String>,
    category: Option<String>,
    difficulty: Option<String>,
) -> Result<Question, anyhow::Error> {
    let client = QuestionClient::new(
        &config_data.service.base_url,
        token,
        config_data.service.timeout_secs,
    );

    match question_id {
        Some(id) => client.get_question(&id).await,
        None => {
            let filter = QuestionFilter {
                category,
                difficulty,
                limit: Some(1),
                ..Default::default()
            };
            let questions = client.list_questions(&filter).await?;
            questions.into_iter().next().ok_or_else(|| {
                anyhow::anyhow!(
                    "No questions match the given filters. Try 'prept questions' to browse the catalog."
                )
            })
        }
    }
}

/// The interactive loop. Returns `Some(feedback)` after a successful
/// submission, `None` when the user cancels.
async fn run_practice_loop(
    tui: &mut PracticeTui,
    controller: &mut CaptureController,
    session: &std::sync::Arc<std::sync::Mutex<crate::recording::RecordingSession>>,
    question: &Question,
    config_data: &PreptConfig,
    token: Option<String>,
) -> Result<Option<Feedback>, anyhow::Error> {
    let mut frame_count = 0u64;

    loop {
        frame_count += 1;
        let view = {
            let session = session.lock().unwrap();
            SessionView {
                state: session.state(),
                elapsed_secs: session.elapsed_secs(),
                has_audio: session
                    .finalized_audio()
                    .is_some_and(|audio| !audio.is_empty()),
            }
        };
        tui.render(view)
            .map_err(|e| anyhow::anyhow!("Render failed: {e}"))?;

        if view.state == crate::recording::SessionState::Recording && frame_count % 60 == 0 {
            tracing::debug!("Recording: {}s recorded", view.elapsed_secs);
        }

        match tui.handle_input() {
            Ok(PracticeCommand::Continue) => {}
            Ok(PracticeCommand::ToggleRecording) => {
                if controller.is_recording() {
                    controller.stop_recording();
                } else if let Err(e) = controller.start_recording() {
                    tracing::error!("Failed to start recording: {e}");
                    tui.set_notice(format!("{e}"));
                }
            }
            Ok(PracticeCommand::Play) => {
                let audio = session.lock().unwrap().finalized_audio().cloned();
                match audio {
                    Some(audio) if !audio.is_empty() => {
                        // Detached so playback doesn't freeze the loop
                        std::thread::spawn(move || {
                            if let Err(e) = recording::play_preview(&audio) {
                                tracing::warn!("Playback failed: {e}");
                            }
                        });
                        tui.set_notice("playing preview...");
                    }
                    _ => tui.set_notice("nothing recorded yet"),
                }
            }
            Ok(PracticeCommand::Submit) => {
                // A live recording is finalized first so Enter always
                // submits what the user just said
                controller.stop_recording();

                let audio = session.lock().unwrap().finalized_audio().cloned();
                if let Some(audio) = &audio {
                    tracing::debug!(
                        "Finalized audio: {:.2}s ({} samples)",
                        audio.duration_secs(),
                        audio.samples().len()
                    );
                }
                let submission =
                    AnswerSubmission::new(&question.id, tui.answer_text(), audio.as_ref());

                if !submission.has_content() {
                    tui.set_notice("record an answer or type one before submitting");
                    continue;
                }

                match submit_with_spinner(tui, config_data, token.clone(), submission.clone())
                    .await
                {
                    Ok(feedback) => {
                        save_to_history(question, &submission, &feedback);
                        return Ok(Some(feedback));
                    }
                    Err(e) => {
                        // Session and typed text stay untouched for retry
                        tracing::warn!("Submission failed: {e}");
                        tui.set_notice(format!("{e}"));
                    }
                }
            }
            Ok(PracticeCommand::Cancel) => {
                return Ok(None);
            }
            Err(e) => {
                tracing::error!("Input handling error: {e}");
                return Err(anyhow::anyhow!("Input handling error: {e}"));
            }
        }
    }
}

/// Submits the answer while animating a spinner.
async fn submit_with_spinner(
    tui: &mut PracticeTui,
    config_data: &PreptConfig,
    token: Option<String>,
    submission: AnswerSubmission,
) -> Result<Feedback, anyhow::Error> {
    let client = AnswerClient::new(
        &config_data.service.base_url,
        token,
        config_data.service.timeout_secs,
    );

    let submission_handle =
        tokio::spawn(async move { client.submit_answer(&submission).await });

    loop {
        if let Err(e) = tui.render_submitting() {
            tracing::warn!("Failed to render spinner: {e}");
        }

        if submission_handle.is_finished() {
            break;
        }

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    match submission_handle.await {
        Ok(Ok(feedback)) => Ok(feedback),
        Ok(Err(e)) => Err(e.into()),
        Err(e) => Err(anyhow::anyhow!("Submission task failed: {e}")),
    }
}

/// Records the submission and its feedback in the local history database.
fn save_to_history(question: &Question, submission: &AnswerSubmission, feedback: &Feedback) {
    let Some(home) = dirs::home_dir() else {
        tracing::warn!("Could not determine home directory; skipping history save");
        return;
    };
    let data_dir = home.join(".local").join("share").join("prept");

    let result = HistoryManager::new(&data_dir).and_then(|mut manager| {
        manager.save_answer(
            &question.id,
            &question.title,
            submission.answer_text.as_deref(),
            submission.audio.is_some(),
            &feedback.feedback,
            feedback.score,
        )
    });

    if let Err(e) = result {
        tracing::warn!("Failed to save answer to history: {e}");
    }
}

/// Prints the feedback to stdout once the TUI has been torn down.
fn print_feedback(question: &Question, feedback: &Feedback) {
    println!();
    println!("{}", style(&question.title).bold());
    println!();
    println!("{}", feedback.feedback);

    if let Some(score) = feedback.score {
        println!();
        println!("score: {:.0}%", score * 100.0);
    }
    if !feedback.keywords_mentioned.is_empty() {
        println!(
            "{} {}",
            style("mentioned:").green(),
            feedback.keywords_mentioned.join(", ")
        );
    }
    if !feedback.missing_keywords.is_empty() {
        println!(
            "{} {}",
            style("missing:").yellow(),
            feedback.missing_keywords.join(", ")
        );
    }
    if !feedback.missing_keywords.is_empty() && !question.keywords.is_empty() {
        println!(
            "{} {}",
            style("target keywords:").dim(),
            question.keywords.join(", ")
        );
    }

    if let Some(sample_answer) = &question.sample_answer {
        println!();
        println!("{}", style("sample answer").bold().dim());
        println!("{sample_answer}");
    }
}
