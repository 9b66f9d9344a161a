//! Microphone capture controller.
//!
//! Owns the cpal input stream for the duration of a recording and feeds
//! captured fragments into the shared [`RecordingSession`]. Audio is captured
//! from the configured input device at its native sample rate and downmixed
//! to mono before it reaches the session. The device handle is released
//! exactly once, on stop or on drop.

use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use super::session::RecordingSession;

#[cfg(target_os = "linux")]
use std::fs::OpenOptions;
#[cfg(target_os = "linux")]
use std::os::unix::io::AsRawFd;

/// Failures starting a capture session.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The host denied access or has no usable input device. Recoverable by
    /// user retry; the session stays in its prior state.
    #[error("audio capture device unavailable: {0}")]
    DeviceUnavailable(String),
    /// A capture is already running; it must be stopped first.
    #[error("a recording is already in progress")]
    AlreadyRecording,
}

/// Controls the microphone capture lifecycle for one practice run.
///
/// Holds the session behind an `Arc<Mutex<_>>` so the cpal callback thread
/// can append fragments while the command loop reads state and elapsed time.
pub struct CaptureController {
    session: Arc<Mutex<RecordingSession>>,
    /// Active input stream; present only while recording
    stream: Option<cpal::Stream>,
    /// Device name or "default" to use the system default device
    device_name: String,
    requested_sample_rate: u32,
}

impl CaptureController {
    /// Creates a controller for the given device with a fresh idle session.
    ///
    /// The actual capture rate may differ from `requested_sample_rate`
    /// depending on device capabilities.
    pub fn new(requested_sample_rate: u32, device_name: String) -> Self {
        Self {
            session: Arc::new(Mutex::new(RecordingSession::new())),
            stream: None,
            device_name,
            requested_sample_rate,
        }
    }

    /// Shared handle to the underlying session for state and timer reads.
    pub fn session(&self) -> Arc<Mutex<RecordingSession>> {
        Arc::clone(&self.session)
    }

    /// Acquires the input device and starts capturing.
    ///
    /// Transitions the session to `Recording`, resetting its timer and
    /// discarding any previous artifact. Rejected with `AlreadyRecording`
    /// while a capture is live so a second start can never orphan the
    /// active device stream.
    ///
    /// # Errors
    /// - `AlreadyRecording` if a capture is already running
    /// - `DeviceUnavailable` if the device cannot be acquired or configured
    pub fn start_recording(&mut self) -> Result<(), CaptureError> {
        if self.stream.is_some() {
            return Err(CaptureError::AlreadyRecording);
        }

        // Get device while suppressing ALSA library warnings
        let device = suppress_alsa_warnings(|| {
            let host = cpal::default_host();

            if self.device_name == "default" {
                host.default_input_device()
                    .ok_or_else(|| anyhow!("No audio input device available"))
            } else {
                find_device_by_name(&host, &self.device_name)
            }
        })
        .map_err(|e| CaptureError::DeviceUnavailable(e.to_string()))?;

        let device_name = device
            .name()
            .unwrap_or_else(|_| "Unknown device".to_string());
        tracing::info!("Recording device: {}", device_name);

        let device_config = device
            .default_input_config()
            .map_err(|e| CaptureError::DeviceUnavailable(e.to_string()))?;
        let device_sample_rate = device_config.sample_rate().0;
        let num_channels = device_config.channels() as usize;

        if device_sample_rate != self.requested_sample_rate {
            tracing::warn!(
                "Requested sample rate {}Hz but device uses {}Hz. Recording at device rate.",
                self.requested_sample_rate,
                device_sample_rate
            );
        }

        tracing::debug!(
            "Device configuration: {}Hz, {} channels",
            device_sample_rate,
            num_channels
        );

        // The session guards against double-start too; checked before the
        // stream exists so a rejection leaves no device handle behind
        if !self.session.lock().unwrap().begin(device_sample_rate) {
            return Err(CaptureError::AlreadyRecording);
        }

        let session_arc = Arc::clone(&self.session);
        let callback_channels = num_channels;

        // From here on a failure must roll the session back to Idle, or it
        // would sit in Recording with no stream behind it and reject every
        // later start
        let stream = match device.build_input_stream(
            &device_config.into(),
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                handle_audio_callback(data, &session_arc, callback_channels);
            },
            |err| {
                tracing::error!("Audio stream error: {}", err);
            },
            None,
        ) {
            Ok(stream) => stream,
            Err(e) => {
                self.session.lock().unwrap().abort();
                return Err(CaptureError::DeviceUnavailable(e.to_string()));
            }
        };

        if let Err(e) = stream.play() {
            self.session.lock().unwrap().abort();
            return Err(CaptureError::DeviceUnavailable(e.to_string()));
        }
        self.stream = Some(stream);

        tracing::debug!("Audio stream started");
        Ok(())
    }

    /// Stops capturing and finalizes the session's audio artifact.
    ///
    /// Dropping the stream releases the device; fragments that race the stop
    /// are discarded by the session's state check. Calling while not
    /// recording is a no-op.
    pub fn stop_recording(&mut self) {
        if self.stream.take().is_none() {
            return;
        }
        self.session.lock().unwrap().finalize();
    }

    pub fn is_recording(&self) -> bool {
        self.stream.is_some()
    }
}

impl Drop for CaptureController {
    fn drop(&mut self) {
        // Releases the device on teardown paths that skip an explicit stop
        self.stop_recording();
    }
}

/// Appends one callback buffer to the session, downmixing to mono.
fn handle_audio_callback(
    data: &[i16],
    session_arc: &Arc<Mutex<RecordingSession>>,
    num_channels: usize,
) {
    let mut session = session_arc.lock().unwrap();

    match num_channels {
        1 => {
            session.push_chunk(data);
        }
        2 => {
            let mono: Vec<i16> = data
                .chunks_exact(2)
                .map(|pair| {
                    let left = pair[0] as i32;
                    let right = pair[1] as i32;
                    ((left + right) / 2) as i16
                })
                .collect();
            session.push_chunk(&mono);
        }
        _ => {
            let mono: Vec<i16> = data
                .chunks_exact(num_channels)
                .map(|frame| {
                    let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                    (sum / num_channels as i32) as i16
                })
                .collect();
            session.push_chunk(&mono);
        }
    }
}

/// Finds an audio input device by name or numeric index.
///
/// # Arguments
/// * `host` - The cpal audio host
/// * `device_spec` - Either "default" for system default, a device name, or a numeric index (0, 1, 2, etc.)
///
/// # Errors
/// - If no device with the specified name/index is found
fn find_device_by_name(host: &cpal::Host, device_spec: &str) -> Result<cpal::Device> {
    // Try to parse as a numeric index first
    if let Ok(index) = device_spec.parse::<usize>() {
        let devices: Vec<_> = host
            .input_devices()
            .map_err(|e| anyhow!("Failed to enumerate devices: {e}"))?
            .collect();

        if index < devices.len() {
            return Ok(devices.into_iter().nth(index).unwrap());
        } else {
            return Err(anyhow!(
                "Device index {} is out of range (0-{})",
                index,
                devices.len().saturating_sub(1)
            ));
        }
    }

    // Try to find by name
    let devices = host
        .input_devices()
        .map_err(|e| anyhow!("Failed to enumerate devices: {e}"))?;

    for device in devices {
        if let Ok(name) = device.name() {
            if name == device_spec {
                return Ok(device);
            }
        }
    }

    Err(anyhow!(
        "Audio input device '{device_spec}' not found. Use 'prept list-devices' to see available devices."
    ))
}

/// Temporarily redirects stderr to /dev/null to suppress ALSA library warnings on Linux.
/// On non-Linux platforms, this is a no-op since ALSA doesn't exist.
#[cfg(target_os = "linux")]
pub(crate) fn suppress_alsa_warnings<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    // Open /dev/null for writing
    let dev_null = OpenOptions::new()
        .write(true)
        .open("/dev/null")
        .map_err(|e| anyhow!("Failed to open /dev/null: {e}"))?;

    let dev_null_fd = dev_null.as_raw_fd();

    // Save the current stderr file descriptor
    let old_stderr = unsafe { libc::dup(libc::STDERR_FILENO) };
    if old_stderr == -1 {
        return Err(anyhow!("Failed to duplicate stderr"));
    }

    // Redirect stderr to /dev/null
    let redirect_result = unsafe { libc::dup2(dev_null_fd, libc::STDERR_FILENO) };
    if redirect_result == -1 {
        unsafe { libc::close(old_stderr) };
        return Err(anyhow!("Failed to redirect stderr"));
    }

    // Execute the closure
    let result = f();

    // Restore the original stderr
    unsafe {
        libc::dup2(old_stderr, libc::STDERR_FILENO);
        libc::close(old_stderr);
    }

    result
}

/// On non-Linux platforms, no stderr suppression is needed since ALSA doesn't exist.
#[cfg(not(target_os = "linux"))]
pub(crate) fn suppress_alsa_warnings<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    f()
}
