//! Answer history for prept.
//!
//! Persistent local record of submitted answers and the feedback returned
//! by the interview service.

pub mod storage;

pub use storage::{AnswerEntry, HistoryManager};
