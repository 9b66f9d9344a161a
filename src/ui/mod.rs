//! Terminal UI surfaces for prept.

pub mod error;
pub mod practice;

pub use error::ErrorScreen;
pub use practice::{PracticeCommand, PracticeTui, SessionView};
