pub mod resampler;
pub mod vad;
pub mod wav;

#[cfg(feature = "audio-io")]
pub mod input;

pub use resampler::MonoResampler;
pub use vad::SpeechDetector;

#[cfg(feature = "audio-io")]
pub use input::MicInput;

/// Sample rate the capture pipeline normalizes to (what Whisper and the
/// VAD expect)
pub const CAPTURE_SAMPLE_RATE: u32 = 16_000;
