//! Kiosk microphone capture.
//!
//! Runs a configured capture command (e.g. `arecord -f S16_LE -r 16000
//! -d 6 -t wav -`) and collects the WAV it writes to stdout. The whole
//! contract is blocking: the session layer runs it via `spawn_blocking`
//! so a long recording never stalls other sessions.

use std::process::Command;

use tracing::debug;

use asha_core::error::SpeechError;
use asha_core::speech::AudioCapture;

/// Capture via a shell command writing WAV to stdout.
pub struct CommandCapture {
    command: String,
}

impl CommandCapture {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl AudioCapture for CommandCapture {
    fn record(&self) -> Result<Vec<u8>, SpeechError> {
        debug!(command = %self.command, "Recording utterance");

        let output = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .output()
            .map_err(|e| SpeechError::CaptureFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::CaptureFailed(format!(
                "capture command exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        if output.stdout.is_empty() {
            return Err(SpeechError::CaptureFailed("no audio captured".into()));
        }

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_command_returns_stdout() {
        let capture = CommandCapture::new("printf RIFFWAVE");
        let bytes = capture.record().unwrap();
        assert_eq!(bytes, b"RIFFWAVE");
    }

    #[test]
    fn failing_command_is_capture_failure() {
        let capture = CommandCapture::new("exit 3");
        let err = capture.record().unwrap_err();
        assert!(matches!(err, SpeechError::CaptureFailed(_)));
    }

    #[test]
    fn empty_output_is_capture_failure() {
        let capture = CommandCapture::new("true");
        let err = capture.record().unwrap_err();
        assert!(matches!(err, SpeechError::CaptureFailed(_)));
    }
}
