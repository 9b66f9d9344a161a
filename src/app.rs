//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to appropriate command handlers.

use crate::commands;
use crate::jobs::JobFilter;
use crate::logging;
use crate::questions::QuestionFilter;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::process;

/// A terminal-based interview practice recorder with voice answer submission
#[derive(Parser)]
#[command(name = "prept")]
#[command(version)]
#[command(about = "\n\n ┏┓┏┓┏┓┏┓╋\n ┣┛┛ ┗ ┣┛┗")]
#[command(long_about = "\n\n ┏┓┏┓┏┓┏┓╋\n ┣┛┛ ┗ ┣┛┗\n\nA terminal-based interview practice recorder.\nRecord spoken answers to practice questions, optionally add a written\nanswer, and submit to your interview service for feedback.\n\nDEFAULT COMMAND:\n    If no command is specified, 'practice' is used by default.\n\nEXAMPLES:\n    # Practice a random question\n    $ prept\n    $ prept practice\n    \n    # Practice a specific question\n    $ prept practice 7c9e6679-7425-40de-944b-e07fc1f90ae7\n    \n    # Practice a medium algorithms question\n    $ prept practice --category algorithms --difficulty medium\n    \n    # Browse the question catalog\n    $ prept questions --company acme --limit 20\n    \n    # Browse recommended jobs and track applications\n    $ prept jobs\n    $ prept applications\n    \n    # Review past answers and feedback\n    $ prept history\n    \n    # Configure the interview service and API token\n    $ prept auth")]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/prept/prept.toml\n    Logs:               ~/.local/state/prept/prept.log.*\n\nFor more information, visit: https://github.com/prept/prept"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Practice a question: record, type, and submit an answer (default)
    ///
    /// Press 'r' to start/stop recording, Tab to type a written answer,
    /// 'p' to replay the recording, Enter to submit, Escape/q to quit.
    #[command(visible_alias = "p")]
    Practice {
        /// Question id to practice (picks one from the catalog if omitted)
        #[arg(value_name = "QUESTION_ID")]
        question: Option<String>,

        /// Restrict the catalog pick to a category
        #[arg(short, long)]
        category: Option<String>,

        /// Restrict the catalog pick to a difficulty
        #[arg(short, long)]
        difficulty: Option<String>,
    },

    /// Browse the question catalog
    ///
    /// Lists questions from the interview service with optional filters.
    #[command(visible_alias = "q")]
    Questions {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by difficulty
        #[arg(short, long)]
        difficulty: Option<String>,

        /// Filter by tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Filter by company tag
        #[arg(long)]
        company: Option<String>,

        /// Maximum number of questions to list (service caps at 50)
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },

    /// Like a question on the interview service
    Like {
        /// Question id to like
        #[arg(value_name = "QUESTION_ID")]
        question: String,
    },

    /// Show per-question practice progress
    ///
    /// Fetches attempt counts and status from the interview service.
    Progress,

    /// Browse job postings matched to your profile
    ///
    /// Shows personalized recommendations, or searches the aggregated job
    /// boards when keywords or filters are given.
    #[command(visible_alias = "j")]
    Jobs {
        /// Search keyword (repeatable)
        #[arg(short, long)]
        keyword: Vec<String>,

        /// Filter search results by location
        #[arg(short, long)]
        location: Option<String>,

        /// Filter search results by experience level
        #[arg(short, long)]
        experience: Option<String>,

        /// Maximum number of recommendations to list (service caps at 50)
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Apply to a job posting
    Apply {
        /// Job posting id to apply to
        #[arg(value_name = "JOB_ID")]
        job: String,
    },

    /// List job applications and update their status
    Applications {
        /// Application id to update
        #[arg(long, value_name = "APPLICATION_ID", requires = "status")]
        update: Option<String>,

        /// New status, e.g. "interviewing" or "offer"
        #[arg(long, requires = "update")]
        status: Option<String>,
    },

    /// View past answers and their feedback
    ///
    /// Browses the local history of submitted answers, most recent first.
    #[command(visible_alias = "h")]
    History {
        /// Maximum number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Configure the interview service URL and API token
    #[command(visible_alias = "a")]
    Auth,

    /// Open configuration file in your preferred editor
    ///
    /// Edit audio and service settings. Uses $EDITOR or falls back to nano/vim.
    #[command(visible_alias = "c")]
    Config,

    /// List available audio input devices
    ///
    /// Shows device IDs, names, and configurations to help configure
    /// the correct input device in prept.toml.
    #[command(name = "list-devices")]
    ListDevices,

    /// Show recent log entries from the application
    ///
    /// Display the last 50 lines of the most recent log file.
    /// Useful for troubleshooting issues.
    Logs,

    /// Generate shell completion script
    ///
    /// Generate completion script for your shell. Save the output to your
    /// shell's completion directory or source it directly.
    ///
    /// Examples:
    ///   prept completions bash > prept.bash
    ///   prept completions zsh > _prept
    ///   prept completions fish > prept.fish
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the main application based on command-line arguments.
///
/// # Exit Codes
/// - 0: Success
/// - 1: General error
/// - 2: Usage error (invalid arguments)
///
/// # Errors
/// - If logging initialization fails
/// - If command execution fails (e.g., recording, submission, history viewing)
pub async fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Handle commands that don't need logging or config setup
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            generate(*shell, &mut Cli::command(), "prept", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::ListDevices) => {
            return match commands::handle_list_devices() {
                Ok(()) => Ok(()),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
        }
        Some(Commands::Logs) => {
            return match commands::handle_logs() {
                Ok(()) => Ok(()),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
        }
        _ => {}
    }

    // Initialize logging for all other commands
    logging::init_logging()?;

    // Route to appropriate command handler
    match cli.command {
        None => {
            commands::handle_practice(None, None, None).await?;
        }
        Some(Commands::Practice {
            question,
            category,
            difficulty,
        }) => {
            commands::handle_practice(question, category, difficulty).await?;
        }
        Some(Commands::Questions {
            category,
            difficulty,
            tag,
            company,
            limit,
        }) => {
            let filter = QuestionFilter {
                category,
                difficulty,
                tag,
                company,
                limit: Some(limit),
            };
            commands::handle_questions(filter).await?;
        }
        Some(Commands::Like { question }) => {
            commands::handle_like(question).await?;
        }
        Some(Commands::Progress) => {
            commands::handle_progress().await?;
        }
        Some(Commands::Jobs {
            keyword,
            location,
            experience,
            limit,
        }) => {
            let filter = JobFilter {
                keywords: keyword,
                location,
                experience_level: experience,
                limit: Some(limit),
            };
            commands::handle_jobs(filter).await?;
        }
        Some(Commands::Apply { job }) => {
            commands::handle_apply(job).await?;
        }
        Some(Commands::Applications { update, status }) => {
            commands::handle_applications(update, status).await?;
        }
        Some(Commands::History { limit }) => {
            commands::handle_history(limit).await?;
        }
        Some(Commands::Auth) => {
            if let Err(e) = commands::handle_auth().await {
                // Check if it's a cancellation error (cliclack already displayed the message)
                let err_msg = e.to_string();
                if err_msg.contains("cancelled") || err_msg.contains("interrupted") {
                    // Silent exit - cliclack already showed "Operation cancelled"
                    process::exit(0);
                } else {
                    return Err(e);
                }
            }
        }
        Some(Commands::Config) => {
            commands::handle_config()?;
        }
        Some(Commands::Completions { .. }) | Some(Commands::ListDevices) | Some(Commands::Logs) => {
            unreachable!("These commands are handled earlier")
        }
    }

    Ok(())
}
