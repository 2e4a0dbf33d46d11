//! Mono resampling between the device rate and the 16 kHz capture rate

use crate::{MiniquestError, Result};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use tracing::debug;

const CHUNK_FRAMES: usize = 1024;

/// Mono audio resampler. A no-op passthrough when the rates already match.
///
/// Callers may feed chunks of any size; input is buffered internally and
/// handed to the sinc resampler in full blocks only, so a stream of small
/// device callbacks never gets padded with silence mid-stream.
pub struct MonoResampler {
    resampler: Option<SincFixedIn<f32>>,
    pending: Vec<f32>,
    input_rate: u32,
    output_rate: u32,
}

impl MonoResampler {
    pub fn new(input_rate: u32, output_rate: u32) -> Result<Self> {
        if input_rate == 0 || output_rate == 0 {
            return Err(MiniquestError::ConfigError(
                "Sample rates must be greater than 0".into(),
            ));
        }

        if input_rate == output_rate {
            return Ok(Self {
                resampler: None,
                pending: Vec::new(),
                input_rate,
                output_rate,
            });
        }

        let params = SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };

        let resampler = SincFixedIn::<f32>::new(
            output_rate as f64 / input_rate as f64,
            2.0,
            params,
            CHUNK_FRAMES,
            1,
        )
        .map_err(|e| {
            MiniquestError::AudioProcessingError(format!("Failed to create resampler: {}", e))
        })?;

        debug!("Created resampler: {} Hz -> {} Hz", input_rate, output_rate);

        Ok(Self {
            resampler: Some(resampler),
            pending: Vec::with_capacity(CHUNK_FRAMES),
            input_rate,
            output_rate,
        })
    }

    pub fn input_rate(&self) -> u32 {
        self.input_rate
    }

    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }

    /// Resample a buffer of mono samples. Samples that do not yet fill a
    /// whole resampler block stay buffered until the next call; use
    /// [`flush`](Self::flush) to drain them at the end of a stream.
    pub fn resample(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let resampler = match self.resampler.as_mut() {
            Some(r) => r,
            None => return Ok(input.to_vec()),
        };

        self.pending.extend_from_slice(input);

        let ratio = self.output_rate as f64 / self.input_rate as f64;
        let mut output = Vec::with_capacity((self.pending.len() as f64 * ratio * 1.1) as usize);

        while self.pending.len() >= CHUNK_FRAMES {
            let chunk: Vec<f32> = self.pending.drain(..CHUNK_FRAMES).collect();

            let resampled = resampler.process(&[chunk], None).map_err(|e| {
                MiniquestError::AudioProcessingError(format!("Resampling failed: {}", e))
            })?;
            output.extend_from_slice(&resampled[0]);
        }

        Ok(output)
    }

    /// Drain any buffered tail. The final partial block is zero-padded and
    /// only the output share covering real input is returned.
    pub fn flush(&mut self) -> Result<Vec<f32>> {
        let resampler = match self.resampler.as_mut() {
            Some(r) => r,
            None => return Ok(Vec::new()),
        };

        if self.pending.is_empty() {
            return Ok(Vec::new());
        }

        let fed = self.pending.len();
        let mut chunk = vec![0.0f32; CHUNK_FRAMES];
        chunk[..fed].copy_from_slice(&self.pending);
        self.pending.clear();

        let resampled = resampler.process(&[chunk], None).map_err(|e| {
            MiniquestError::AudioProcessingError(format!("Resampling failed: {}", e))
        })?;

        let ratio = self.output_rate as f64 / self.input_rate as f64;
        let take = ((fed as f64 * ratio).round() as usize).min(resampled[0].len());
        Ok(resampled[0][..take].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_rejected() {
        assert!(MonoResampler::new(0, 16000).is_err());
        assert!(MonoResampler::new(48000, 0).is_err());
    }

    #[test]
    fn test_passthrough_when_rates_match() {
        let mut resampler = MonoResampler::new(16000, 16000).unwrap();
        let input = vec![0.5f32; 100];
        let output = resampler.resample(&input).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_downsample_shrinks_output() {
        let mut resampler = MonoResampler::new(48000, 16000).unwrap();
        let input = vec![0.1f32; 4800]; // 100ms at 48kHz
        let mut output = resampler.resample(&input).unwrap();
        output.extend(resampler.flush().unwrap());
        assert!(!output.is_empty());
        // Roughly a third of the input length
        assert!(output.len() < input.len());
    }

    #[test]
    fn test_streaming_chunks_preserve_duration_and_signal() {
        // Feed a steady tone in small device-callback-sized chunks, the way
        // the capture thread does. The output must cover the same duration
        // as one big call and must not have silence spliced into it.
        let mut resampler = MonoResampler::new(48000, 16000).unwrap();

        let total = 9600; // 200ms at 48kHz
        let signal: Vec<f32> = (0..total)
            .map(|i| (i as f32 * 0.05).sin() * 0.5)
            .collect();

        let mut output = Vec::new();
        for chunk in signal.chunks(480) {
            output.extend(resampler.resample(chunk).unwrap());
        }
        output.extend(resampler.flush().unwrap());

        // 9600 input samples at a 1/3 ratio: expect about 3200 out
        assert!(
            output.len() >= 2800 && output.len() <= 3600,
            "expected ~3200 output samples, got {}",
            output.len()
        );

        // A continuous tone spends almost no time near zero; padded silence
        // between chunks would show up as long near-zero runs.
        let near_zero = output.iter().filter(|s| s.abs() < 0.01).count();
        assert!(
            near_zero < output.len() / 5,
            "{} of {} output samples near zero",
            near_zero,
            output.len()
        );
    }

    #[test]
    fn test_flush_drains_buffered_tail() {
        let mut resampler = MonoResampler::new(48000, 16000).unwrap();
        // Less than one internal block: nothing comes out until flushed
        let output = resampler.resample(&vec![0.5f32; 480]).unwrap();
        assert!(output.is_empty());
        let tail = resampler.flush().unwrap();
        assert_eq!(tail.len(), 160);
        // Flushing again is a no-op
        assert!(resampler.flush().unwrap().is_empty());
    }

    #[test]
    fn test_empty_input() {
        let mut resampler = MonoResampler::new(44100, 16000).unwrap();
        assert!(resampler.resample(&[]).unwrap().is_empty());
    }
}
