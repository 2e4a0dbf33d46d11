//! Whisper transcription engine
//!
//! One blocking transcription pass per captured utterance. The model is
//! loaded once at startup; a missing model file degrades capture to
//! unavailable rather than failing the application.

use crate::config::CaptureConfig;
use crate::{MiniquestError, Result};
use std::path::PathBuf;
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Subset of capture configuration the engine needs
#[derive(Clone, Debug)]
pub struct WhisperConfig {
    pub model_path: PathBuf,
    pub language: String,
    pub n_threads: i32,
}

impl From<&CaptureConfig> for WhisperConfig {
    fn from(config: &CaptureConfig) -> Self {
        Self {
            model_path: config.model_path.clone(),
            language: config.language.clone(),
            n_threads: config.n_threads,
        }
    }
}

pub struct WhisperEngine {
    config: WhisperConfig,
    context: WhisperContext,
}

impl WhisperEngine {
    pub fn new(config: WhisperConfig) -> Result<Self> {
        info!("Loading Whisper model from: {:?}", config.model_path);

        if !config.model_path.exists() {
            return Err(MiniquestError::ModelLoadError(format!(
                "Model file not found: {:?}",
                config.model_path
            )));
        }

        let context = WhisperContext::new_with_params(
            config
                .model_path
                .to_str()
                .ok_or_else(|| MiniquestError::ModelLoadError("Invalid model path".to_string()))?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| {
            MiniquestError::ModelLoadError(format!("Failed to load Whisper model: {:?}", e))
        })?;

        info!("Whisper model loaded successfully");

        Ok(Self { config, context })
    }

    /// Transcribe one utterance (mono f32 samples at 16 kHz) and return
    /// the single best transcript.
    pub fn transcribe(&self, samples: &[f32]) -> Result<String> {
        if samples.is_empty() {
            return Err(MiniquestError::CaptureError(
                "Empty audio segment".to_string(),
            ));
        }

        debug!(
            "Transcribing utterance: {} samples, {:.2}s",
            samples.len(),
            samples.len() as f32 / 16000.0
        );

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_n_threads(self.config.n_threads);
        params.set_translate(false);
        params.set_language(Some(&self.config.language));
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        let mut state = self.context.create_state().map_err(|e| {
            MiniquestError::CaptureError(format!("Failed to create state: {:?}", e))
        })?;

        state.full(params, samples).map_err(|e| {
            MiniquestError::CaptureError(format!("Transcription failed: {:?}", e))
        })?;

        let num_segments = state.full_n_segments().map_err(|e| {
            MiniquestError::CaptureError(format!("Failed to get segments: {:?}", e))
        })?;

        let mut text = String::new();
        for i in 0..num_segments {
            let segment_text = state.full_get_segment_text(i).map_err(|e| {
                MiniquestError::CaptureError(format!("Failed to get segment text: {:?}", e))
            })?;
            text.push_str(&segment_text);
        }

        let text = text.trim().to_string();
        debug!("Transcript: '{}'", text);

        Ok(text)
    }
}
