//! Recording session state machine.
//!
//! A session moves `Idle -> Recording -> Stopped` and may be restarted from
//! `Stopped`, which discards the previous artifact. Audio fragments are
//! appended in arrival order while `Recording` and assembled into a single
//! finalized WAV artifact on stop. The session owns the elapsed-time counter
//! shown in the practice view.

use anyhow::Result;
use std::io::Cursor;
use std::path::Path;
use std::time::{Duration, Instant};

/// Lifecycle state of a recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No capture has happened since creation or the last reset
    Idle,
    /// The capture device is live and fragments are accumulating
    Recording,
    /// Capture has ended and a finalized artifact is available
    Stopped,
}

/// The single assembled audio artifact produced when a session stops.
///
/// Always 16-bit mono PCM; encoded as WAV for playback and submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedAudio {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl FinalizedAudio {
    /// MIME type used when the artifact is attached to a submission.
    pub const MIME: &'static str = "audio/wav";

    /// File name used for the multipart audio part and temp playback files.
    pub const FILE_NAME: &'static str = "answer.wav";

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// True when the recording stopped before any audio arrived.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the recorded audio in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Encodes the artifact as a WAV byte buffer.
    ///
    /// # Errors
    /// - If WAV encoding fails
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
            for &sample in &self.samples {
                writer.write_sample(sample)?;
            }
            writer.finalize()?;
        }

        Ok(cursor.into_inner())
    }

    /// Writes the artifact to a WAV file, e.g. for playback preview.
    ///
    /// # Errors
    /// - If WAV encoding fails
    /// - If the file cannot be written
    pub fn write_wav(&self, path: &Path) -> Result<()> {
        let bytes = self.to_wav_bytes()?;
        std::fs::write(path, bytes)?;
        tracing::debug!("Finalized audio written to {}", path.display());
        Ok(())
    }
}

/// State machine for one microphone capture session.
///
/// The capture layer feeds fragments in through [`push_chunk`] from the audio
/// callback; everything else is driven by the practice command loop. Only one
/// session exists per practice run and only the controller mutates it.
///
/// [`push_chunk`]: RecordingSession::push_chunk
#[derive(Debug)]
pub struct RecordingSession {
    state: SessionState,
    /// Mono PCM fragments in arrival order; non-empty only while Recording
    chunks: Vec<Vec<i16>>,
    finalized: Option<FinalizedAudio>,
    sample_rate: u32,
    started_at: Option<Instant>,
    /// Elapsed time frozen at the last stop, retained until the next start
    frozen_elapsed: Duration,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            chunks: Vec::new(),
            finalized: None,
            sample_rate: 0,
            started_at: None,
            frozen_elapsed: Duration::ZERO,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Transitions to `Recording`, clearing prior fragments and any previous
    /// finalized artifact, and resetting the elapsed counter to zero.
    ///
    /// Returns `false` without changing anything if the session is already
    /// `Recording`; a live capture must be stopped first.
    pub fn begin(&mut self, sample_rate: u32) -> bool {
        if self.state == SessionState::Recording {
            tracing::warn!("Start requested while already recording; rejected");
            return false;
        }

        self.chunks.clear();
        self.finalized = None;
        self.sample_rate = sample_rate;
        self.frozen_elapsed = Duration::ZERO;
        self.started_at = Some(Instant::now());
        self.state = SessionState::Recording;

        tracing::debug!("Recording session started at {}Hz", sample_rate);
        true
    }

    /// Appends one audio fragment in arrival order.
    ///
    /// Fragments delivered when the session is not `Recording` (late
    /// callbacks racing a stop) are discarded.
    pub fn push_chunk(&mut self, chunk: &[i16]) {
        if self.state != SessionState::Recording {
            tracing::trace!(
                "Discarding {}-sample fragment delivered outside Recording state",
                chunk.len()
            );
            return;
        }
        self.chunks.push(chunk.to_vec());
    }

    /// Assembles accumulated fragments into the finalized artifact and
    /// transitions to `Stopped`, freezing the elapsed counter.
    ///
    /// A no-op returning `false` when the session is not `Recording`. A stop
    /// with zero fragments is permitted and yields an empty artifact; the
    /// submission guard treats an empty artifact as no audio.
    pub fn finalize(&mut self) -> bool {
        if self.state != SessionState::Recording {
            return false;
        }

        if let Some(started_at) = self.started_at.take() {
            self.frozen_elapsed = started_at.elapsed();
        }

        let samples: Vec<i16> = self.chunks.drain(..).flatten().collect();
        let sample_count = samples.len();

        self.finalized = Some(FinalizedAudio {
            samples,
            sample_rate: self.sample_rate,
        });
        self.state = SessionState::Stopped;

        if sample_count == 0 {
            tracing::warn!("Recording stopped with no samples captured");
        } else {
            tracing::info!(
                "Recording stopped: {:.2}s ({} samples at {}Hz)",
                sample_count as f32 / self.sample_rate as f32,
                sample_count,
                self.sample_rate
            );
        }

        true
    }

    /// Rolls a live session back to `Idle`, discarding accumulated fragments
    /// and resetting the elapsed counter.
    ///
    /// Used when the capture stream fails after the session has already
    /// started, so the session never stays in `Recording` without a device
    /// stream behind it. A no-op outside `Recording`.
    pub fn abort(&mut self) {
        if self.state != SessionState::Recording {
            return;
        }
        self.chunks.clear();
        self.started_at = None;
        self.frozen_elapsed = Duration::ZERO;
        self.state = SessionState::Idle;
        tracing::warn!("Recording session aborted; no audio was captured");
    }

    /// Elapsed recording time in whole seconds, for display only.
    ///
    /// Counts up while `Recording`, holds its last value in `Stopped`, and
    /// resets to zero on the next start.
    pub fn elapsed_secs(&self) -> u64 {
        match self.started_at {
            Some(started_at) => (self.frozen_elapsed + started_at.elapsed()).as_secs(),
            None => self.frozen_elapsed.as_secs(),
        }
    }

    /// The finalized artifact, present only once the session is `Stopped`.
    pub fn finalized_audio(&self) -> Option<&FinalizedAudio> {
        self.finalized.as_ref()
    }

    /// Number of samples accumulated so far (Recording) or finalized (Stopped).
    pub fn sample_count(&self) -> usize {
        match &self.finalized {
            Some(audio) => audio.samples.len(),
            None => self.chunks.iter().map(|c| c.len()).sum(),
        }
    }
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle_with_no_chunks() {
        let session = RecordingSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.sample_count(), 0);
        assert!(session.finalized_audio().is_none());
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn chunks_are_assembled_in_arrival_order() {
        let mut session = RecordingSession::new();
        assert!(session.begin(16_000));
        session.push_chunk(&[1, 2, 3]);
        session.push_chunk(&[4, 5]);
        assert!(session.finalize());

        let audio = session.finalized_audio().expect("finalized audio");
        assert_eq!(audio.samples(), &[1, 2, 3, 4, 5]);
        assert_eq!(audio.sample_rate(), 16_000);
    }

    #[test]
    fn stop_when_not_recording_is_a_noop() {
        let mut session = RecordingSession::new();
        assert!(!session.finalize());
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.finalized_audio().is_none());

        session.begin(16_000);
        session.push_chunk(&[7]);
        assert!(session.finalize());
        let before = session.finalized_audio().cloned();

        // Second stop leaves the prior artifact untouched
        assert!(!session.finalize());
        assert_eq!(session.state(), SessionState::Stopped);
        assert_eq!(session.finalized_audio().cloned(), before);
    }

    #[test]
    fn start_while_recording_is_rejected() {
        let mut session = RecordingSession::new();
        assert!(session.begin(16_000));
        session.push_chunk(&[1, 2]);

        assert!(!session.begin(48_000));
        assert_eq!(session.state(), SessionState::Recording);
        assert_eq!(session.sample_count(), 2);
        assert_eq!(session.finalized_audio(), None);
        assert!(session.finalize());
        assert_eq!(session.finalized_audio().unwrap().sample_rate(), 16_000);
    }

    #[test]
    fn restart_discards_previous_artifact() {
        let mut session = RecordingSession::new();
        session.begin(16_000);
        session.push_chunk(&[1, 2, 3]);
        session.finalize();
        assert!(session.finalized_audio().is_some());

        assert!(session.begin(16_000));
        assert_eq!(session.state(), SessionState::Recording);
        assert!(session.finalized_audio().is_none());
        assert_eq!(session.sample_count(), 0);

        session.push_chunk(&[9]);
        session.finalize();
        assert_eq!(session.finalized_audio().unwrap().samples(), &[9]);
    }

    #[test]
    fn late_chunks_after_stop_are_discarded() {
        let mut session = RecordingSession::new();
        session.begin(16_000);
        session.push_chunk(&[1]);
        session.finalize();

        session.push_chunk(&[2, 3]);
        assert_eq!(session.finalized_audio().unwrap().samples(), &[1]);
        assert_eq!(session.sample_count(), 1);
    }

    #[test]
    fn chunks_before_start_are_discarded() {
        let mut session = RecordingSession::new();
        session.push_chunk(&[1, 2]);
        assert_eq!(session.sample_count(), 0);

        session.begin(16_000);
        assert_eq!(session.sample_count(), 0);
    }

    #[test]
    fn abort_returns_a_live_session_to_idle() {
        let mut session = RecordingSession::new();
        session.begin(16_000);
        session.push_chunk(&[1, 2]);

        session.abort();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.sample_count(), 0);
        assert!(session.finalized_audio().is_none());
        assert_eq!(session.elapsed_secs(), 0);

        // A fresh start works after an abort
        assert!(session.begin(16_000));
        session.push_chunk(&[3]);
        assert!(session.finalize());
        assert_eq!(session.finalized_audio().unwrap().samples(), &[3]);
    }

    #[test]
    fn abort_outside_recording_is_a_noop() {
        let mut session = RecordingSession::new();
        session.abort();
        assert_eq!(session.state(), SessionState::Idle);

        session.begin(16_000);
        session.push_chunk(&[7]);
        session.finalize();

        session.abort();
        assert_eq!(session.state(), SessionState::Stopped);
        assert_eq!(session.finalized_audio().unwrap().samples(), &[7]);
    }

    #[test]
    fn stop_with_zero_chunks_yields_empty_artifact() {
        let mut session = RecordingSession::new();
        session.begin(16_000);
        assert!(session.finalize());

        let audio = session.finalized_audio().expect("finalized audio");
        assert!(audio.is_empty());
        assert_eq!(audio.duration_secs(), 0.0);
    }

    #[test]
    fn wav_bytes_round_trip_through_hound() {
        let mut session = RecordingSession::new();
        session.begin(8_000);
        session.push_chunk(&[10, -20]);
        session.push_chunk(&[30]);
        session.finalize();

        let bytes = session
            .finalized_audio()
            .unwrap()
            .to_wav_bytes()
            .expect("wav encoding");
        assert_eq!(&bytes[0..4], b"RIFF");

        let reader = hound::WavReader::new(std::io::Cursor::new(bytes)).expect("wav parsing");
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 8_000);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.into_samples().collect::<Result<_, _>>().unwrap();
        assert_eq!(samples, vec![10, -20, 30]);
    }
}
