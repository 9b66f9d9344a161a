//! Answer history storage and retrieval using SQLite.
//!
//! Manages persistent storage of submitted answers and the feedback they
//! received, so past practice runs can be reviewed offline.

use anyhow::Result;
use chrono::{DateTime, Local};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// A single submitted answer in the history.
#[derive(Debug, Clone)]
pub struct AnswerEntry {
    /// Unique identifier for this entry
    pub id: i64,
    /// Interview service question id
    pub question_id: String,
    /// Question title at submission time
    pub question_title: String,
    /// Typed answer text, if any
    pub answer_text: Option<String>,
    /// Whether a voice recording was part of the submission
    pub had_audio: bool,
    /// Feedback text the service returned
    pub feedback: String,
    /// Keyword coverage score, if the service reported one
    pub score: Option<f64>,
    /// When this answer was submitted
    pub created_at: DateTime<Local>,
}

/// Manages the answer history database.
pub struct HistoryManager {
    /// Path to the SQLite database file
    database_path: PathBuf,
    /// Connection to the database (lazy-loaded)
    connection: Option<Connection>,
}

impl HistoryManager {
    /// Creates a new history manager for the given data directory.
    ///
    /// # Errors
    /// - If the data directory cannot be created
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let database_path = data_dir.join("answer_history.db");

        Ok(Self {
            database_path,
            connection: None,
        })
    }

    /// Initializes database connection and creates tables if necessary.
    ///
    /// # Errors
    /// - If the database file cannot be opened
    /// - If table creation fails
    fn get_connection(&mut self) -> Result<&Connection> {
        if self.connection.is_none() {
            let connection = Connection::open(&self.database_path)?;

            connection.execute(
                "CREATE TABLE IF NOT EXISTS answers (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    question_id TEXT NOT NULL,
                    question_title TEXT NOT NULL,
                    answer_text TEXT,
                    had_audio INTEGER NOT NULL DEFAULT 0,
                    feedback TEXT NOT NULL,
                    score REAL,
                    created_at TEXT NOT NULL
                )",
                [],
            )?;

            self.connection = Some(connection);
        }

        Ok(self.connection.as_ref().unwrap())
    }

    /// Saves a submitted answer and its feedback to the history database.
    ///
    /// # Errors
    /// - If database connection fails
    /// - If insertion fails
    pub fn save_answer(
        &mut self,
        question_id: &str,
        question_title: &str,
        answer_text: Option<&str>,
        had_audio: bool,
        feedback: &str,
        score: Option<f64>,
    ) -> Result<()> {
        let connection = self.get_connection()?;
        let timestamp = Local::now().to_rfc3339();

        connection.execute(
            "INSERT INTO answers
             (question_id, question_title, answer_text, had_audio, feedback, score, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                question_id,
                question_title,
                answer_text,
                had_audio,
                feedback,
                score,
                timestamp
            ],
        )?;

        tracing::debug!("Answer saved to history");
        Ok(())
    }

    /// Retrieves all answers ordered by most recent first.
    ///
    /// # Errors
    /// - If database connection fails
    /// - If query execution fails
    /// - If timestamp parsing fails
    pub fn get_all_answers(&mut self) -> Result<Vec<AnswerEntry>> {
        let connection = self.get_connection()?;

        let mut statement = connection.prepare(
            "SELECT id, question_id, question_title, answer_text, had_audio,
                    feedback, score, created_at
             FROM answers ORDER BY created_at DESC",
        )?;

        let entries = statement
            .query_map([], |row| {
                let timestamp_str = row.get::<_, String>(7)?;
                let created_at = DateTime::parse_from_rfc3339(&timestamp_str)
                    .map(|dt| dt.with_timezone(&Local))
                    .map_err(|_| {
                        rusqlite::Error::InvalidParameterName(
                            "Invalid timestamp format".to_string(),
                        )
                    })?;

                Ok(AnswerEntry {
                    id: row.get(0)?,
                    question_id: row.get(1)?,
                    question_title: row.get(2)?,
                    answer_text: row.get(3)?,
                    had_audio: row.get(4)?,
                    feedback: row.get(5)?,
                    score: row.get(6)?,
                    created_at,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_answers_come_back_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = HistoryManager::new(dir.path()).unwrap();

        manager
            .save_answer("q-1", "Binary search", Some("use two pointers"), false, "Ok", None)
            .unwrap();
        manager
            .save_answer("q-2", "Hash maps", None, true, "Good coverage", Some(0.7))
            .unwrap();

        let entries = manager.get_all_answers().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].question_id, "q-2");
        assert!(entries[0].had_audio);
        assert_eq!(entries[0].score, Some(0.7));
        assert_eq!(entries[1].answer_text.as_deref(), Some("use two pointers"));
        assert!(!entries[1].had_audio);
    }

    #[test]
    fn empty_history_returns_no_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = HistoryManager::new(dir.path()).unwrap();
        assert!(manager.get_all_answers().unwrap().is_empty());
    }
}
