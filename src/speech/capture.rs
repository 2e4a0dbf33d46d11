//! Microphone speech capture
//!
//! Desktop stand-in for the browser's one-shot speech recognition: each
//! `start()` opens the microphone, waits for the child to speak, ends the
//! utterance on trailing silence, runs one Whisper pass, and emits exactly
//! one terminal event. A capture that never hears speech ends with a
//! "no speech" error, like the browser API's `no-speech` outcome.

use crate::audio::resampler::MonoResampler;
use crate::audio::vad::{SpeechDetector, VAD_CHUNK_SIZE};
use crate::audio::{wav, MicInput, CAPTURE_SAMPLE_RATE};
use crate::config::CaptureConfig;
use crate::speech::engine::{WhisperConfig, WhisperEngine};
use crate::speech::{CaptureEvent, SpeechCapture};
use crate::{MiniquestError, Result};
use crossbeam_channel::{bounded, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long to wait on the raw audio channel before treating the input
/// stream as stalled
const CHUNK_RECV_TIMEOUT: Duration = Duration::from_millis(500);

pub struct MicCapture {
    config: CaptureConfig,
    engine: Arc<WhisperEngine>,
    event_tx: Sender<CaptureEvent>,
    in_flight: Arc<AtomicBool>,
}

impl MicCapture {
    /// Probe the capability once at startup. Fails with ModelLoadError or
    /// AudioDeviceError when the platform cannot capture; the caller then
    /// runs the session without voice input.
    pub fn new(config: CaptureConfig, event_tx: Sender<CaptureEvent>) -> Result<Self> {
        let engine = Arc::new(WhisperEngine::new(WhisperConfig::from(&config))?);

        // Streams are not Send, so each capture opens its own; this probe
        // only establishes that a device exists right now.
        let probe = MicInput::new()?;
        info!(
            "Speech capture available (device rate {} Hz)",
            probe.sample_rate()
        );
        drop(probe);

        Ok(Self {
            config,
            engine,
            event_tx,
            in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    fn run_capture(
        config: &CaptureConfig,
        engine: &WhisperEngine,
    ) -> Result<String> {
        let mut input = MicInput::new()?;
        let (raw_tx, raw_rx) = bounded::<Vec<f32>>(64);
        input.start(raw_tx)?;

        let mut resampler = MonoResampler::new(input.sample_rate(), CAPTURE_SAMPLE_RATE)?;
        let mut detector = SpeechDetector::new(config.vad_threshold)?;
        detector.reset();

        // Timing is tracked in samples at the capture rate so endpointing
        // is independent of chunk arrival jitter
        let no_speech_samples =
            (config.no_speech_window.as_secs_f64() * CAPTURE_SAMPLE_RATE as f64) as usize;
        let silence_samples =
            (config.silence_window.as_secs_f64() * CAPTURE_SAMPLE_RATE as f64) as usize;
        let max_samples =
            (config.max_utterance.as_secs_f64() * CAPTURE_SAMPLE_RATE as f64) as usize;

        let mut pending: Vec<f32> = Vec::new();
        let mut utterance: Vec<f32> = Vec::new();
        let mut samples_seen = 0usize;
        let mut trailing_silence = 0usize;
        let mut in_speech = false;

        'capture: loop {
            let chunk = raw_rx.recv_timeout(CHUNK_RECV_TIMEOUT).map_err(|_| {
                MiniquestError::CaptureError("microphone stream stalled".to_string())
            })?;
            pending.extend(resampler.resample(&chunk)?);

            while pending.len() >= VAD_CHUNK_SIZE {
                let frame: Vec<f32> = pending.drain(..VAD_CHUNK_SIZE).collect();
                samples_seen += VAD_CHUNK_SIZE;
                let is_speech = detector.is_speech(&frame);

                if !in_speech {
                    if is_speech {
                        in_speech = true;
                        trailing_silence = 0;
                        utterance.extend_from_slice(&frame);
                        debug!("Speech started after {} samples", samples_seen);
                    } else if samples_seen >= no_speech_samples {
                        input.stop();
                        return Err(MiniquestError::CaptureError(
                            "no speech detected".to_string(),
                        ));
                    }
                    continue;
                }

                utterance.extend_from_slice(&frame);

                if is_speech {
                    trailing_silence = 0;
                } else {
                    trailing_silence += VAD_CHUNK_SIZE;
                    if trailing_silence >= silence_samples {
                        debug!(
                            "Utterance ended on silence ({} samples total)",
                            utterance.len()
                        );
                        break 'capture;
                    }
                }

                if utterance.len() >= max_samples {
                    warn!("Utterance hit the max duration cap");
                    break 'capture;
                }
            }
        }

        input.stop();
        drop(input);

        if let Some(dir) = &config.debug_dump_dir {
            let path = dir.join(format!("utterance-{}.wav", uuid::Uuid::new_v4()));
            if let Err(e) = wav::write_utterance(&path, &utterance) {
                warn!("Failed to dump utterance: {}", e);
            }
        }

        let text = engine.transcribe(&utterance)?;
        if text.is_empty() {
            return Err(MiniquestError::CaptureError(
                "speech was not recognized".to_string(),
            ));
        }
        Ok(text)
    }
}

impl SpeechCapture for MicCapture {
    fn start(&mut self) -> Result<()> {
        // One capture at a time; the session's listening guard already
        // enforces this for conforming callers
        if self.in_flight.swap(true, Ordering::SeqCst) {
            warn!("Capture already in flight; ignoring start");
            return Ok(());
        }

        let config = self.config.clone();
        let engine = Arc::clone(&self.engine);
        let event_tx = self.event_tx.clone();
        let in_flight = Arc::clone(&self.in_flight);

        thread::Builder::new()
            .name("speech-capture".to_string())
            .spawn(move || {
                let event = match Self::run_capture(&config, &engine) {
                    Ok(text) => CaptureEvent::Transcript(text),
                    Err(e) => CaptureEvent::Error(e.to_string()),
                };
                in_flight.store(false, Ordering::SeqCst);
                if event_tx.send(event).is_err() {
                    warn!("Capture event receiver dropped");
                }
            })
            .map_err(|e| {
                self.in_flight.store(false, Ordering::SeqCst);
                MiniquestError::CaptureError(format!("failed to spawn capture thread: {}", e))
            })?;

        Ok(())
    }
}
