//! Fixed-size PCM frame payloads
//!
//! A [`Frame`] is one transmission unit of quantized audio: exactly
//! `channels * samples_per_frame` interleaved i16 samples, serialized
//! little-endian. Frames are immutable once built and cheap to clone.

use bytes::{BufMut, Bytes, BytesMut};

use crate::constants::BYTES_PER_SAMPLE;

/// One protocol-sized chunk of 16-bit PCM, ready for transmission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    payload: Bytes,
}

impl Frame {
    /// Serialize interleaved i16 samples into a frame payload
    pub fn from_samples(samples: &[i16]) -> Self {
        let mut payload = BytesMut::with_capacity(samples.len() * BYTES_PER_SAMPLE);
        for &sample in samples {
            payload.put_i16_le(sample);
        }
        Self {
            payload: payload.freeze(),
        }
    }

    /// All-zero frame of one configuration's payload size
    pub fn silence(channels: u16, samples_per_frame: usize) -> Self {
        let len = channels as usize * samples_per_frame * BYTES_PER_SAMPLE;
        Self {
            payload: Bytes::from(vec![0u8; len]),
        }
    }

    /// Raw payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// True if every byte of the payload is zero
    pub fn is_silence(&self) -> bool {
        self.payload.iter().all(|&b| b == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_serialization_is_little_endian() {
        let frame = Frame::from_samples(&[0x0102, -1]);
        assert_eq!(frame.as_bytes(), &[0x02, 0x01, 0xFF, 0xFF]);
    }

    #[test]
    fn test_silence_frame() {
        let frame = Frame::silence(2, 128);
        assert_eq!(frame.len(), 2 * 128 * 2);
        assert!(frame.is_silence());
    }

    #[test]
    fn test_zero_samples_are_silence() {
        let frame = Frame::from_samples(&[0; 64]);
        assert!(frame.is_silence());
        assert_eq!(frame, Frame::silence(1, 64));
    }
}
