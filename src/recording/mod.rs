//! Audio answer recording for prept.
//!
//! Provides the capture session state machine, the cpal-backed capture
//! controller, and playback preview of the finalized artifact.

pub mod capture;
pub mod playback;
pub mod session;

pub use capture::{CaptureController, CaptureError};
pub use playback::play_preview;
pub use session::{FinalizedAudio, RecordingSession, SessionState};
