//! Speech detection for utterance endpointing
//!
//! Wraps Silero VAD. The capture pipeline feeds fixed-size chunks and uses
//! the per-chunk speech decision to find the start and end of the child's
//! utterance.

use crate::{MiniquestError, Result};
use tracing::info;
use voice_activity_detector::VoiceActivityDetector;

/// Chunk size the detector expects at 16 kHz (32 ms)
pub const VAD_CHUNK_SIZE: usize = 512;

pub struct SpeechDetector {
    detector: VoiceActivityDetector,
    threshold: f32,
}

impl SpeechDetector {
    /// Create a detector for 16 kHz mono audio.
    pub fn new(threshold: f32) -> Result<Self> {
        let detector = VoiceActivityDetector::builder()
            .sample_rate(16_000_i32)
            .chunk_size(VAD_CHUNK_SIZE)
            .build()
            .map_err(|e| {
                MiniquestError::AudioProcessingError(format!("Failed to create VAD: {:?}", e))
            })?;

        info!("Initialized VAD with threshold {}", threshold);

        Ok(Self {
            detector,
            threshold: threshold.clamp(0.0, 1.0),
        })
    }

    /// Whether a chunk of audio contains speech.
    pub fn is_speech(&mut self, chunk: &[f32]) -> bool {
        self.detector.predict(chunk.iter().copied()) >= self.threshold
    }

    /// Reset detector state between captures.
    pub fn reset(&mut self) {
        self.detector.reset();
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}
