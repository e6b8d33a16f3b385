//! PCM frame encoder
//!
//! Slices arbitrary-length audio into protocol-sized frames: resample to
//! the protocol rate when needed, peak-normalize, quantize to 16-bit PCM,
//! and partition into frame groups.

use crate::audio::frame::Frame;
use crate::audio::resample::resample;
use crate::constants::PROTOCOL_SAMPLE_RATE;
use crate::error::EncodeError;

/// Encodes floating-point audio into fixed-size transmission frames
#[derive(Debug, Clone)]
pub struct FrameEncoder {
    channels: u16,
    samples_per_frame: usize,
}

impl FrameEncoder {
    pub fn new(channels: u16, samples_per_frame: usize) -> Self {
        assert!(channels > 0, "channel count must be non-zero");
        assert!(samples_per_frame > 0, "samples_per_frame must be non-zero");
        Self {
            channels,
            samples_per_frame,
        }
    }

    /// Interleaved samples in one frame (all channels)
    pub fn frame_samples(&self) -> usize {
        self.channels as usize * self.samples_per_frame
    }

    /// Encode interleaved f32 samples into an ordered sequence of frames.
    ///
    /// Input at a rate other than 48 kHz is resampled first; resampling
    /// errors propagate. The loudest sample is scaled to unit magnitude
    /// unless the input is all zero (all-zero input encodes to all-zero
    /// frames, which is genuine audio, not silence substitution). A
    /// trailing remainder smaller than one frame is discarded.
    pub fn encode(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<Frame>, EncodeError> {
        let resampled;
        let samples = if sample_rate != PROTOCOL_SAMPLE_RATE {
            resampled = resample(samples, self.channels, sample_rate, PROTOCOL_SAMPLE_RATE)?;
            &resampled[..]
        } else {
            samples
        };

        let peak = samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()));
        let scale = if peak == 0.0 { 1.0 } else { 1.0 / peak };

        let amplitude = i16::MAX as f32;
        let quantized: Vec<i16> = samples
            .iter()
            .map(|&s| (s * scale * amplitude) as i16)
            .collect();

        Ok(quantized
            .chunks_exact(self.frame_samples())
            .map(Frame::from_samples)
            .collect())
    }
}
