//! Playback preview of a finalized recording via the system audio player.

use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::process::Command;

use super::session::FinalizedAudio;

/// Plays the finalized artifact through the system's default audio player.
///
/// The artifact is written to a temp WAV file first; the file is left in
/// place so repeated previews don't re-encode.
///
/// On macOS: uses `open`. On Linux: tries xdg-open first, then falls back to
/// common audio players (mpv, vlc, ffplay, paplay).
///
/// # Errors
/// - If the artifact is empty
/// - If the temp file cannot be written
/// - If no audio player can be launched
pub fn play_preview(audio: &FinalizedAudio) -> Result<()> {
    if audio.is_empty() {
        return Err(anyhow!("Nothing to play: the recording contains no audio"));
    }

    let audio_path = preview_path();
    audio.write_wav(&audio_path)?;

    tracing::info!(
        "Playing preview: {:.2}s from {}",
        audio.duration_secs(),
        audio_path.display()
    );

    #[cfg(target_os = "macos")]
    {
        Command::new("open")
            .arg(&audio_path)
            .spawn()
            .map_err(|e| anyhow!("Failed to open audio player: {e}"))?
            .wait()
            .map_err(|e| anyhow!("Audio player error: {e}"))?;
    }

    #[cfg(not(target_os = "macos"))]
    {
        let result = Command::new("xdg-open").arg(&audio_path).spawn();

        match result {
            Ok(mut child) => {
                child
                    .wait()
                    .map_err(|e| anyhow!("Audio player error: {e}"))?;
            }
            Err(_) => {
                // Fallback to common audio players if xdg-open fails
                let players = ["mpv", "vlc", "ffplay", "paplay"];
                let mut played = false;

                for player in players {
                    if let Ok(mut child) = Command::new(player).arg(&audio_path).spawn() {
                        let _ = child.wait();
                        played = true;
                        break;
                    }
                }

                if !played {
                    return Err(anyhow!(
                        "No audio player found. Install mpv, vlc, ffplay, or paplay"
                    ));
                }
            }
        }
    }

    Ok(())
}

/// Temp path for the preview WAV, unique per process.
fn preview_path() -> PathBuf {
    std::env::temp_dir().join(format!("prept_{}.wav", std::process::id()))
}
