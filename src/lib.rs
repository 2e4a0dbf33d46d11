pub mod audio;
pub mod config;
pub mod quest;
pub mod session;
pub mod speech;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum MiniquestError {
    #[error("speech capture is not available on this system")]
    CapabilityUnavailable,

    #[error("Capture error: {0}")]
    CaptureError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Model load error: {0}")]
    ModelLoadError(String),

    #[error("Audio processing error: {0}")]
    AudioProcessingError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for MiniquestError {
    fn from(e: std::io::Error) -> Self {
        MiniquestError::IoError(e.to_string())
    }
}

impl MiniquestError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Capture is gone for the whole session once unavailable
            MiniquestError::CapabilityUnavailable => false,
            // A failed capture can simply be retried by speaking again
            MiniquestError::CaptureError(_) => true,
            // The quest service may come back; the user can press the button again
            MiniquestError::NetworkError(_) => true,
            // Hardware/device errors may require user intervention
            MiniquestError::AudioDeviceError(_) => false,
            // Model errors require restarting
            MiniquestError::ModelLoadError(_) => false,
            MiniquestError::AudioProcessingError(_) => true,
            MiniquestError::ConfigError(_) => false,
            MiniquestError::ChannelError(_) => false,
            MiniquestError::IoError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            MiniquestError::CapabilityUnavailable => {
                "Voice input is not available on this device. You can still read the story."
                    .to_string()
            }
            MiniquestError::CaptureError(_) => {
                "We couldn't hear you. Please try speaking again.".to_string()
            }
            MiniquestError::NetworkError(_) => {
                "Couldn't reach the quest service. Please try again.".to_string()
            }
            MiniquestError::AudioDeviceError(_) => {
                "Audio device error. Please check your microphone.".to_string()
            }
            MiniquestError::ModelLoadError(_) => {
                "Failed to load the speech model. Please verify model files are present."
                    .to_string()
            }
            MiniquestError::AudioProcessingError(_) => {
                "Audio processing failed. Please try again.".to_string()
            }
            MiniquestError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            MiniquestError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            MiniquestError::IoError(_) => "File system error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MiniquestError>;
