//! Microphone input via cpal
//!
//! Streams mono f32 chunks at the device's native rate into a channel;
//! the capture pipeline resamples downstream.

use crate::{MiniquestError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct MicInput {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    is_open: Arc<Mutex<bool>>,
}

impl MicInput {
    /// Open the default input device. Failure here means the capture
    /// capability is unavailable for the session.
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host.default_input_device().ok_or_else(|| {
            MiniquestError::AudioDeviceError("No input device available".into())
        })?;

        info!(
            "Using input device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let config = device
            .default_input_config()
            .map_err(|e| {
                MiniquestError::AudioDeviceError(format!("Failed to get input config: {}", e))
            })?
            .into();

        Ok(Self {
            device,
            config,
            stream: None,
            is_open: Arc::new(Mutex::new(false)),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Start streaming mono samples into `audio_tx`. Multi-channel input
    /// is averaged down to mono.
    pub fn start(&mut self, audio_tx: Sender<Vec<f32>>) -> Result<()> {
        if *self.is_open.lock() {
            return Ok(());
        }

        let channels = self.config.channels as usize;
        let is_open = Arc::clone(&self.is_open);

        let err_fn = |err| {
            error!("Audio input stream error: {}", err);
        };

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if !*is_open.lock() {
                        return;
                    }

                    let samples = if channels == 1 {
                        data.to_vec()
                    } else {
                        data.chunks(channels)
                            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                            .collect()
                    };

                    if let Err(e) = audio_tx.try_send(samples) {
                        debug!("Dropping audio chunk: {}", e);
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| {
                MiniquestError::AudioDeviceError(format!("Failed to build input stream: {}", e))
            })?;

        stream.play().map_err(|e| {
            MiniquestError::AudioDeviceError(format!("Failed to start input stream: {}", e))
        })?;

        *self.is_open.lock() = true;
        self.stream = Some(stream);

        info!("Microphone stream opened");
        Ok(())
    }

    pub fn stop(&mut self) {
        *self.is_open.lock() = false;
        if let Some(stream) = self.stream.take() {
            drop(stream);
            info!("Microphone stream closed");
        }
    }

    pub fn is_open(&self) -> bool {
        *self.is_open.lock()
    }
}

impl Drop for MicInput {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    // These pass trivially on machines without audio devices

    #[test]
    fn test_mic_creation() {
        if let Ok(input) = MicInput::new() {
            assert!(input.sample_rate() > 0);
            assert!(!input.is_open());
        }
    }

    #[test]
    fn test_open_close() {
        if let Ok(mut input) = MicInput::new() {
            let (tx, _rx) = bounded(10);
            if input.start(tx).is_ok() {
                assert!(input.is_open());
                input.stop();
                assert!(!input.is_open());
            }
        }
    }
}
