//! Debug WAV dumps of captured utterances

use crate::audio::CAPTURE_SAMPLE_RATE;
use crate::{MiniquestError, Result};
use std::path::Path;
use tracing::debug;

/// Write mono 16 kHz f32 samples as a 16-bit PCM WAV file.
pub fn write_utterance(path: &Path, samples: &[f32]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: CAPTURE_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| MiniquestError::IoError(format!("Failed to create WAV file: {}", e)))?;

    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(value)
            .map_err(|e| MiniquestError::IoError(format!("Failed to write sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| MiniquestError::IoError(format!("Failed to finalize WAV file: {}", e)))?;

    debug!("Wrote utterance dump: {:?} ({} samples)", path, samples.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_utterance() {
        let dir = std::env::temp_dir();
        let path = dir.join("miniquest_wav_test.wav");
        let samples: Vec<f32> = (0..1600).map(|i| (i as f32 * 0.01).sin() * 0.5).collect();

        write_utterance(&path, &samples).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, CAPTURE_SAMPLE_RATE);
        assert_eq!(reader.len(), 1600);

        let _ = std::fs::remove_file(&path);
    }
}
