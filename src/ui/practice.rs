//! Terminal user interface for the practice workflow.
//!
//! Shows the current question, the recording indicator with its elapsed-time
//! counter, and a free-text answer field. Key handling switches between a
//! review mode (recording controls, submit, quit) and a text-editing mode
//! backed by tui-input.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::{stdout, Stdout};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::questions::Question;
use crate::recording::SessionState;

/// User input command during a practice run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeCommand {
    /// Keep looping (no actionable key pressed)
    Continue,
    /// Start or stop the recording ('r')
    ToggleRecording,
    /// Play back the finalized recording ('p')
    Play,
    /// Submit the answer (Enter in review mode)
    Submit,
    /// Exit without submitting (Escape or 'q' in review mode)
    Cancel,
}

/// Which part of the screen receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Review,
    TextAnswer,
}

/// Snapshot of session state the view needs each frame.
#[derive(Debug, Clone, Copy)]
pub struct SessionView {
    pub state: SessionState,
    pub elapsed_secs: u64,
    pub has_audio: bool,
}

/// Terminal UI for one practice run.
pub struct PracticeTui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    question_title: String,
    question_body: String,
    answer_input: Input,
    focus: Focus,
    spinner_frame: usize,
    /// Transient message shown instead of the key hints until the next key
    notice: Option<String>,
}

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

impl PracticeTui {
    /// Creates the TUI and enters alternate screen mode.
    ///
    /// # Errors
    /// - If the terminal cannot be initialized
    /// - If raw mode cannot be enabled
    pub fn new(question: &Question) -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(PracticeTui {
            terminal,
            question_title: question.title.clone(),
            question_body: format!(
                "[{} / {}]\n\n{}",
                question.category, question.difficulty, question.description
            ),
            answer_input: Input::default(),
            focus: Focus::Review,
            spinner_frame: 0,
            notice: None,
        })
    }

    /// Sets a transient notice shown in place of the key hints.
    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    /// The typed answer text as it currently stands.
    pub fn answer_text(&self) -> &str {
        self.answer_input.value()
    }

    /// Processes pending input and returns the resulting command.
    ///
    /// In review mode the keys drive the recording workflow; Tab moves focus
    /// into the answer field, where keystrokes edit text until Tab, Escape,
    /// or Enter return to review mode.
    ///
    /// # Errors
    /// - If event polling fails
    pub fn handle_input(&mut self) -> anyhow::Result<PracticeCommand> {
        if !event::poll(std::time::Duration::from_millis(50))? {
            return Ok(PracticeCommand::Continue);
        }

        let Event::Key(key) = event::read()? else {
            return Ok(PracticeCommand::Continue);
        };
        if key.kind == KeyEventKind::Release {
            return Ok(PracticeCommand::Continue);
        }
        self.notice = None;

        // Ctrl+C cancels from either focus
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            tracing::debug!("Ctrl+C pressed: canceling practice run");
            return Ok(PracticeCommand::Cancel);
        }

        match self.focus {
            Focus::TextAnswer => {
                match key.code {
                    KeyCode::Tab | KeyCode::Esc | KeyCode::Enter => {
                        self.focus = Focus::Review;
                    }
                    _ => {
                        self.answer_input.handle_event(&Event::Key(key));
                    }
                }
                Ok(PracticeCommand::Continue)
            }
            Focus::Review => Ok(match key.code {
                KeyCode::Char('r') => {
                    tracing::debug!("'r' pressed: toggling recording");
                    PracticeCommand::ToggleRecording
                }
                KeyCode::Char('p') => PracticeCommand::Play,
                KeyCode::Tab | KeyCode::Char('e') => {
                    self.focus = Focus::TextAnswer;
                    PracticeCommand::Continue
                }
                KeyCode::Enter => {
                    tracing::debug!("Enter pressed: submitting answer");
                    PracticeCommand::Submit
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    tracing::debug!("Escape or 'q' pressed: canceling practice run");
                    PracticeCommand::Cancel
                }
                _ => PracticeCommand::Continue,
            }),
        }
    }

    /// Renders the practice view for the current session state.
    ///
    /// # Errors
    /// - If terminal rendering fails
    pub fn render(&mut self, session: SessionView) -> anyhow::Result<()> {
        let title = self.question_title.clone();
        let body = self.question_body.clone();
        let answer_focused = self.focus == Focus::TextAnswer;
        let answer_value = self.answer_input.value().to_string();
        let visual_cursor = self.answer_input.visual_cursor();
        let notice = self.notice.clone();

        self.terminal.draw(|frame| {
            let [question_area, answer_area, status_area, help_area] = Layout::vertical([
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(frame.area());

            let question = Paragraph::new(body.as_str())
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(title.as_str()));
            frame.render_widget(question, question_area);

            let answer_style = if answer_focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let answer = Paragraph::new(answer_value.as_str()).style(answer_style).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("text answer (Tab to edit)"),
            );
            frame.render_widget(answer, answer_area);

            if answer_focused {
                frame.set_cursor_position((
                    answer_area.x + 1 + visual_cursor as u16,
                    answer_area.y + 1,
                ));
            }

            let minutes = session.elapsed_secs / 60;
            let secs = session.elapsed_secs % 60;
            let timer = format!("{minutes}:{secs:02}");

            let status_line = match session.state {
                SessionState::Recording => Line::from(vec![
                    Span::styled("● ", Style::default().fg(Color::Red)),
                    Span::raw(format!("recording {timer}")),
                ]),
                SessionState::Stopped => Line::from(vec![
                    Span::styled("■ ", Style::default().fg(Color::Green)),
                    Span::raw(format!("recorded {timer}")),
                ]),
                SessionState::Idle => Line::from(Span::styled(
                    "○ not recording",
                    Style::default().fg(Color::DarkGray),
                )),
            };
            frame.render_widget(Paragraph::new(status_line), status_area);

            let help = match &notice {
                Some(message) => Paragraph::new(message.as_str())
                    .style(Style::default().fg(Color::Red)),
                None => {
                    let mut hints =
                        vec!["r record/stop".to_string(), "Tab edit text".to_string()];
                    if session.has_audio {
                        hints.push("p play".to_string());
                    }
                    hints.push("Enter submit".to_string());
                    hints.push("q quit".to_string());
                    Paragraph::new(hints.join("  ·  "))
                        .style(Style::default().fg(Color::DarkGray))
                }
            };
            frame.render_widget(help, help_area);
        })?;

        Ok(())
    }

    /// Renders one frame of the submitting spinner.
    ///
    /// # Errors
    /// - If terminal rendering fails
    pub fn render_submitting(&mut self) -> anyhow::Result<()> {
        let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
        self.spinner_frame += 1;

        self.terminal.draw(|frame| {
            let area = frame.area();
            let message = Paragraph::new(format!("{spinner} Submitting answer..."))
                .alignment(Alignment::Center);
            let centered = Rect {
                x: area.x,
                y: area.y + area.height / 2,
                width: area.width,
                height: 1,
            };
            frame.render_widget(message, centered);
        })?;

        Ok(())
    }

    /// Cleans up terminal state and exits alternate screen mode.
    ///
    /// # Errors
    /// - If terminal mode cannot be disabled
    pub fn cleanup(&mut self) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}
