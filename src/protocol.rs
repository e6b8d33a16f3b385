//! Transport protocol seam
//!
//! The wire header (sample-rate/codec/bit-depth enumerations, stream-name
//! field, frame-counter serialization) belongs to the transport protocol and
//! is not reimplemented here. Callers plug their protocol in through
//! [`HeaderEncoder`]; the sender only concatenates header and payload.

use bytes::{BufMut, Bytes, BytesMut};

use crate::config::StreamConfig;

/// Produces the wire header for one outgoing packet.
///
/// Implementations receive the immutable session configuration and the
/// current frame counter each cycle and return the serialized header bytes.
/// The counter increments by exactly one per packet and wraps at `u32::MAX`;
/// implementations must not assume it is monotonic across a wrap.
///
/// Implementations are shared with the sender thread, so they must be
/// `Send + Sync`. Header encoding runs inside the pacing cycle; it should
/// not block or allocate beyond the returned buffer.
pub trait HeaderEncoder: Send + Sync {
    /// Serialize the header for the packet carrying `frame_counter`
    fn encode_header(&self, config: &StreamConfig, frame_counter: u32) -> Bytes;
}

/// Concatenate header and payload into one datagram
pub fn assemble_packet(header: &[u8], payload: &[u8]) -> Bytes {
    let mut packet = BytesMut::with_capacity(header.len() + payload.len());
    packet.put_slice(header);
    packet.put_slice(payload);
    packet.freeze()
}
