use anyhow::{Context, Result};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Leading window used for ambient-noise calibration, in seconds.
const CALIBRATION_WINDOW_SECS: f32 = 1.0;

/// A fully captured recording: decoded samples plus the ambient-noise
/// floor measured over the leading window.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
    pub noise_floor: f32,
}

impl AudioClip {
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / (self.sample_rate as f32 * self.channels as f32)
    }

    /// Re-encode the captured samples as a 16-bit PCM WAV payload.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>> {
        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)
                .context("Failed to create WAV writer")?;
            for &sample in &self.samples {
                writer.write_sample(sample).context("Failed to write sample")?;
            }
            writer.finalize().context("Failed to finalize WAV data")?;
        }

        Ok(cursor.into_inner())
    }
}

/// Write uploaded bytes to a per-request staging file.
///
/// The name carries a fresh UUID so concurrent uploads never share a path.
pub async fn stage_upload(data: &[u8]) -> Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("voice-api-{}.wav", Uuid::new_v4()));
    tokio::fs::write(&path, data)
        .await
        .with_context(|| format!("Failed to write staging file {}", path.display()))?;
    Ok(path)
}

/// Load a staged file as an audio source, calibrate against ambient noise,
/// and capture the full recording as a sample buffer.
pub async fn capture(path: &Path) -> Result<AudioClip> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read staging file {}", path.display()))?;
    decode_wav(&bytes)
}

/// Remove a staging file. Failures are logged, not propagated; the file
/// lives in the temp directory and will be reaped eventually regardless.
pub async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(
            "Failed to remove staging file {}: {}",
            path.display(),
            e
        );
    }
}

/// Decode WAV bytes into an `AudioClip`.
pub fn decode_wav(bytes: &[u8]) -> Result<AudioClip> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).context("Invalid WAV data")?;
    let spec = reader.spec();

    let samples: Vec<i16> = match spec.sample_format {
        hound::SampleFormat::Int => {
            if spec.bits_per_sample <= 16 {
                reader
                    .into_samples::<i16>()
                    .collect::<std::result::Result<_, _>>()
                    .context("Failed to decode PCM samples")?
            } else {
                let shift = spec.bits_per_sample - 16;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| (v >> shift) as i16))
                    .collect::<std::result::Result<_, _>>()
                    .context("Failed to decode PCM samples")?
            }
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
            .collect::<std::result::Result<_, _>>()
            .context("Failed to decode float samples")?,
    };

    if samples.is_empty() {
        anyhow::bail!("Audio stream contains no samples");
    }

    let noise_floor = ambient_noise_floor(&samples, spec.sample_rate, spec.channels);

    Ok(AudioClip {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        noise_floor,
    })
}

/// Measure the energy floor over the leading calibration window,
/// normalized to [0, 1].
fn ambient_noise_floor(samples: &[i16], sample_rate: u32, channels: u16) -> f32 {
    let window =
        (sample_rate as f32 * channels as f32 * CALIBRATION_WINDOW_SECS) as usize;
    let window = window.clamp(1, samples.len());

    let sum_squares: f64 = samples[..window]
        .iter()
        .map(|&s| {
            let v = s as f64;
            v * v
        })
        .sum();

    let rms = (sum_squares / window as f64).sqrt();
    (rms / i16::MAX as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(samples: &[i16], sample_rate: u32) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn decodes_pcm_wav() {
        let samples = vec![0i16, 100, -100, 3000];
        let clip = decode_wav(&wav_bytes(&samples, 16000)).unwrap();
        assert_eq!(clip.samples, samples);
        assert_eq!(clip.sample_rate, 16000);
        assert_eq!(clip.channels, 1);
    }

    #[test]
    fn rejects_non_wav_bytes() {
        assert!(decode_wav(b"not a wav file").is_err());
    }

    #[test]
    fn rejects_empty_recording() {
        assert!(decode_wav(&wav_bytes(&[], 16000)).is_err());
    }

    #[test]
    fn silence_calibrates_to_zero_floor() {
        let clip = decode_wav(&wav_bytes(&vec![0i16; 16000], 16000)).unwrap();
        assert!(clip.noise_floor < 1e-6);
    }

    #[test]
    fn loud_leading_window_raises_floor() {
        let quiet = decode_wav(&wav_bytes(&vec![10i16; 16000], 16000)).unwrap();
        let loud = decode_wav(&wav_bytes(&vec![20000i16; 16000], 16000)).unwrap();
        assert!(loud.noise_floor > quiet.noise_floor);
    }

    #[test]
    fn calibration_handles_clips_shorter_than_window() {
        let clip = decode_wav(&wav_bytes(&[500i16; 100], 16000)).unwrap();
        assert!(clip.noise_floor > 0.0);
    }

    #[test]
    fn reencodes_to_wav() {
        let samples = vec![1i16, -1, 32000, -32000];
        let clip = decode_wav(&wav_bytes(&samples, 8000)).unwrap();
        let encoded = clip.to_wav_bytes().unwrap();
        let round = decode_wav(&encoded).unwrap();
        assert_eq!(round.samples, samples);
        assert_eq!(round.sample_rate, 8000);
    }

    #[tokio::test]
    async fn staging_files_get_unique_paths() {
        let a = stage_upload(b"one").await.unwrap();
        let b = stage_upload(b"two").await.unwrap();
        assert_ne!(a, b);
        assert_eq!(tokio::fs::read(&a).await.unwrap(), b"one");
        discard(&a).await;
        discard(&b).await;
        assert!(!a.exists());
        assert!(!b.exists());
    }
}
