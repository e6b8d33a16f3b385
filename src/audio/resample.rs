//! Sample-rate conversion to the protocol rate
//!
//! Thin wrapper around [rubato](https://crates.io/crates/rubato). The
//! conversion is treated as a black-box transform: output length is NOT
//! assumed to be exactly `input_len * ratio` (the sinc filter carries its
//! own delay and chunk padding).

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::error::EncodeError;

/// Rubato chunk size in frames
const CHUNK_SIZE: usize = 1024;

/// Convert interleaved f32 samples from `from_rate` to `to_rate`.
///
/// Same-rate input is passed through untouched. Samples that do not form a
/// whole interleaved frame at the tail are ignored by the channel split.
pub fn resample(
    samples: &[f32],
    channels: u16,
    from_rate: u32,
    to_rate: u32,
) -> Result<Vec<f32>, EncodeError> {
    if from_rate == 0 {
        return Err(EncodeError::InvalidSampleRate(from_rate));
    }
    if from_rate == to_rate {
        return Ok(samples.to_vec());
    }
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let channels = channels.max(1) as usize;
    let ratio = to_rate as f64 / from_rate as f64;

    let params = SincInterpolationParameters {
        sinc_len: 128,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };
    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, CHUNK_SIZE, channels)
        .map_err(|e| EncodeError::ResamplerInit(e.to_string()))?;

    // Deinterleave into per-channel buffers
    let frames = samples.len() / channels;
    let mut planar: Vec<Vec<f32>> = vec![Vec::with_capacity(frames); channels];
    for (i, &sample) in samples[..frames * channels].iter().enumerate() {
        planar[i % channels].push(sample);
    }

    fn append(processed: Vec<Vec<f32>>, out_planar: &mut [Vec<f32>]) {
        for (ch, mut chunk) in processed.into_iter().enumerate() {
            out_planar[ch].append(&mut chunk);
        }
    }

    let estimated = (frames as f64 * ratio) as usize + CHUNK_SIZE;
    let mut out_planar: Vec<Vec<f32>> = vec![Vec::with_capacity(estimated); channels];

    // Full chunks
    let mut pos = 0;
    while frames - pos >= resampler.input_frames_next() {
        let need = resampler.input_frames_next();
        let chunk: Vec<&[f32]> = planar.iter().map(|ch| &ch[pos..pos + need]).collect();
        let processed = resampler
            .process(&chunk, None)
            .map_err(|e| EncodeError::ResampleFailed(e.to_string()))?;
        append(processed, &mut out_planar);
        pos += need;
    }

    // Trailing partial chunk, zero-padded internally by rubato
    if pos < frames {
        let chunk: Vec<&[f32]> = planar.iter().map(|ch| &ch[pos..]).collect();
        let processed = resampler
            .process_partial(Some(&chunk), None)
            .map_err(|e| EncodeError::ResampleFailed(e.to_string()))?;
        append(processed, &mut out_planar);
    }

    // Flush the filter delay
    let processed = resampler
        .process_partial::<&[f32]>(None, None)
        .map_err(|e| EncodeError::ResampleFailed(e.to_string()))?;
    append(processed, &mut out_planar);

    // Reinterleave
    let out_frames = out_planar[0].len();
    let mut out = Vec::with_capacity(out_frames * channels);
    for i in 0..out_frames {
        for ch in out_planar.iter() {
            out.push(ch[i]);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_rate_passthrough() {
        let samples = vec![0.1f32, -0.2, 0.3, -0.4];
        let out = resample(&samples, 1, 48_000, 48_000).unwrap();
        assert_eq!(out, samples);
    }

    #[test]
    fn test_empty_input() {
        let out = resample(&[], 1, 24_000, 48_000).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(resample(&[0.0; 16], 1, 0, 48_000).is_err());
    }

    #[test]
    fn test_upsampling_roughly_doubles_length() {
        // one second of a 440 Hz tone at 24 kHz
        let input: Vec<f32> = (0..24_000)
            .map(|i| (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 24_000.0).sin())
            .collect();

        let out = resample(&input, 1, 24_000, 48_000).unwrap();

        let expected = input.len() * 2;
        let deviation = (out.len() as f64 / expected as f64 - 1.0).abs();
        assert!(
            deviation < 0.1,
            "expected ~{} samples, got {}",
            expected,
            out.len()
        );
    }

    #[test]
    fn test_stereo_preserves_channel_count() {
        let input = vec![0.5f32; 2 * 12_000];
        let out = resample(&input, 2, 24_000, 48_000).unwrap();
        // interleaved output must still pair up
        assert_eq!(out.len() % 2, 0);
        assert!(out.len() > input.len());
    }
}
