//! Application configuration
//!
//! Everything is in-memory and ephemeral: a couple of env overrides on top
//! of defaults, no config file and no persisted state.

use std::path::PathBuf;
use std::time::Duration;

/// Where the quest service lives and who the player is
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Base URL of the quest service
    pub base_url: String,
    /// Fixed player identifier sent with every request
    pub player: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            player: "player1".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Build from `MINIQUEST_SERVER` / `MINIQUEST_PLAYER` env vars,
    /// falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("MINIQUEST_SERVER") {
            config.base_url = url;
        }
        if let Ok(player) = std::env::var("MINIQUEST_PLAYER") {
            config.player = player;
        }
        config
    }
}

/// Configuration for on-device speech capture
#[derive(Clone, Debug)]
pub struct CaptureConfig {
    /// Path to the Whisper model file
    pub model_path: PathBuf,

    /// Transcription language (fixed to English for this client)
    pub language: String,

    /// Number of threads to use for transcription
    pub n_threads: i32,

    /// VAD speech probability threshold (0.0-1.0)
    pub vad_threshold: f32,

    /// How long to wait for speech before giving up on a capture
    pub no_speech_window: Duration,

    /// Trailing silence that ends the utterance
    pub silence_window: Duration,

    /// Hard cap on a single utterance
    pub max_utterance: Duration,

    /// Directory for debug WAV dumps of captured utterances (disabled
    /// when None)
    pub debug_dump_dir: Option<PathBuf>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/ggml-base.en.bin"),
            language: "en".to_string(),
            n_threads: 4,
            vad_threshold: 0.5,
            no_speech_window: Duration::from_secs(6),
            silence_window: Duration::from_millis(800),
            max_utterance: Duration::from_secs(30),
            debug_dump_dir: None,
        }
    }
}

/// Complete application configuration
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub capture: CaptureConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            service: ServiceConfig::from_env(),
            capture: CaptureConfig::default(),
        }
    }

    /// Validate the parts that can be checked before starting anything.
    /// A missing speech model is not reported here: capture degrades to
    /// "unavailable" instead of blocking the rest of the UI.
    pub fn validate(&self) -> Result<(), String> {
        if self.service.base_url.is_empty() {
            return Err("quest service base URL is empty".to_string());
        }
        if !self.service.base_url.starts_with("http") {
            return Err(format!(
                "quest service base URL does not look like a URL: {}",
                self.service.base_url
            ));
        }
        if self.service.player.is_empty() {
            return Err("player identifier is empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.capture.vad_threshold) {
            return Err(format!(
                "VAD threshold out of range: {}",
                self.capture.vad_threshold
            ));
        }
        Ok(())
    }
}
