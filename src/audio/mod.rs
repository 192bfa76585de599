//! Scene audio: synthesis, decoding and resampling.

mod decode;
mod resample;
mod synth;

pub use decode::{DecodedAudio, decode_audio_file};
pub use resample::resample;
pub use synth::{CommandSynthesizer, SceneSynthesizer};

use crate::error::Result;
use std::path::Path;

/// Loads scene audio as mono samples at a requested rate.
pub trait SceneDecoder: Sync {
    /// Decode `path` and resample it to `target_rate`.
    fn decode(&self, path: &Path, target_rate: u32) -> Result<DecodedAudio>;
}

/// Decoder backed by symphonia and rubato.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaDecoder;

impl SceneDecoder for SymphoniaDecoder {
    fn decode(&self, path: &Path, target_rate: u32) -> Result<DecodedAudio> {
        let audio = decode_audio_file(path)?;
        if audio.sample_rate == target_rate {
            return Ok(audio);
        }
        let samples = resample(audio.samples, audio.sample_rate, target_rate)?;
        Ok(DecodedAudio::new(samples, target_rate))
    }
}
