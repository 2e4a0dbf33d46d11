//! Speech capture capability
//!
//! Models the platform speech-to-text service as a single-shot operation:
//! every `start()` eventually produces exactly one terminal event on the
//! capture channel, either a final transcript or an error. Availability is
//! resolved once at startup; when the platform has no working microphone
//! or speech model, the session runs without a capture capability and the
//! UI reports it.

pub mod engine;

#[cfg(feature = "audio-io")]
pub mod capture;

use crate::Result;

pub use engine::{WhisperConfig, WhisperEngine};

#[cfg(feature = "audio-io")]
pub use capture::MicCapture;

/// Terminal outcome of one capture. Exactly one is emitted per `start()`.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// Single best transcript of the utterance
    Transcript(String),
    /// Capture failed; nothing will be submitted
    Error(String),
}

/// A single-shot, non-continuous speech-to-text capability.
///
/// `start()` kicks off one capture; the terminal event arrives on the
/// channel the implementation was constructed with. Implementations must
/// not emit interim results.
pub trait SpeechCapture: Send {
    fn start(&mut self) -> Result<()>;
}
