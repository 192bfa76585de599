//! WAV clip writing.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter as HoundWriter};

use crate::error::{Error, Result};

/// Persists one clip.
pub trait ClipSink: Sync {
    /// Write mono `samples` at `sample_rate` to `path`.
    fn write_clip(&self, path: &Path, samples: &[f32], sample_rate: u32) -> Result<()>;
}

/// Writes clips as 16-bit mono PCM WAV files.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavWriter;

impl ClipSink for WavWriter {
    fn write_clip(&self, path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::OutputDirCreateFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        write_wav_file(path, samples, sample_rate)
    }
}

/// Convert a float sample in [-1.0, 1.0] to 16-bit PCM.
#[allow(clippy::cast_possible_truncation)]
fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

/// Write samples to a WAV file, replacing any existing file.
fn write_wav_file(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let wav_error = |source| Error::WavWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = HoundWriter::create(path, spec).map_err(wav_error)?;
    for &sample in samples {
        writer.write_sample(to_pcm16(sample)).map_err(wav_error)?;
    }
    writer.finalize().map_err(wav_error)
}
