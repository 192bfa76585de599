//! Audio resampling using rubato.

use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

/// Frames fed to the resampler per call.
const CHUNK_FRAMES: usize = 1024;

/// Resample mono audio to the target sample rate.
///
/// Returns the input unchanged if already at the target rate. The output
/// holds exactly `ceil(len * to_rate / from_rate)` samples.
pub fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples);
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_FRAMES,
        1,
        1,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let frames_per_call = resampler.input_frames_next();
    let delay = resampler.output_delay();
    let expected = output_len(samples.len(), from_rate, to_rate);
    let mut output = Vec::with_capacity(delay + expected + CHUNK_FRAMES);
    let mut padded = Vec::new();

    for chunk in samples.chunks(frames_per_call) {
        // The final chunk is zero padded to a full block.
        let block = if chunk.len() == frames_per_call {
            chunk
        } else {
            padded.clear();
            padded.extend_from_slice(chunk);
            padded.resize(frames_per_call, 0.0);
            padded.as_slice()
        };
        process_block(&mut resampler, block, &mut output)?;
    }

    // Flush the filter tail so the last input samples reach the output.
    let silence = vec![0.0; frames_per_call];
    while output.len() < delay + expected {
        process_block(&mut resampler, &silence, &mut output)?;
    }

    output.drain(..delay);
    output.truncate(expected);
    Ok(output)
}

fn process_block(resampler: &mut Fft<f32>, block: &[f32], output: &mut Vec<f32>) -> Result<()> {
    let input = SequentialSlice::new(block, 1, block.len()).map_err(|e| Error::Resample {
        reason: format!("failed to create input adapter: {e}"),
    })?;

    let resampled = resampler
        .process(&input, 0, None)
        .map_err(|e| Error::Resample {
            reason: e.to_string(),
        })?;
    output.extend_from_slice(&resampled.take_data());
    Ok(())
}

/// Number of samples `input_len` samples occupy after resampling.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn output_len(input_len: usize, from_rate: u32, to_rate: u32) -> usize {
    ((input_len as f64) * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize
}
