//! # pcmcast
//!
//! Real-time paced PCM audio streaming over UDP.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         CALLER THREAD                            │
//! │                                                                  │
//! │   play_audio(samples, rate)                                      │
//! │        │                                                         │
//! │        ▼                                                         │
//! │   ┌──────────────┐    resample     ┌──────────────┐              │
//! │   │ FrameEncoder │ ◄─────────────► │  48 kHz PCM  │              │
//! │   └──────┬───────┘   (if needed)   └──────────────┘              │
//! │          │ normalize → quantize → partition                      │
//! │          ▼                                                       │
//! │   ┌──────────────┐                                               │
//! │   │ StreamQueue  │ ◄── unbounded FIFO, shared across threads     │
//! │   └──────┬───────┘                                               │
//! └──────────┼───────────────────────────────────────────────────────┘
//!            │
//! ┌──────────┼───────────────────────────────────────────────────────┐
//! │          ▼              SENDER THREAD                            │
//! │   ┌──────────────┐                                               │
//! │   │ PacingSender │  one datagram per samples_per_frame / 48000 s │
//! │   └──────┬───────┘  silence substituted when paused or empty     │
//! │          │ header (external HeaderEncoder) ‖ payload             │
//! │          ▼                                                       │
//! │   ┌──────────────┐                                               │
//! │   │  UDP socket  │ ──► (stream_ip, stream_port)                  │
//! │   └──────────────┘                                               │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The wire header itself belongs to the transport protocol and is supplied
//! by the caller through the [`protocol::HeaderEncoder`] trait; this crate
//! only paces, payloads, and transmits.

pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod network;
pub mod protocol;

pub use audio::encoder::FrameEncoder;
pub use audio::frame::Frame;
pub use audio::queue::{PauseGate, StreamQueue};
pub use config::StreamConfig;
pub use controller::StreamController;
pub use error::{Error, Result};
pub use network::sender::SenderStatsSnapshot;
pub use protocol::HeaderEncoder;

/// Application-wide constants
pub mod constants {
    /// Fixed sample rate of the transport protocol
    pub const PROTOCOL_SAMPLE_RATE: u32 = 48_000;

    /// Bytes per sample (signed 16-bit PCM)
    pub const BYTES_PER_SAMPLE: usize = 2;

    /// Default stream name
    pub const DEFAULT_STREAM_NAME: &str = "Stream1";

    /// Default destination address
    pub const DEFAULT_STREAM_IP: &str = "127.0.0.1";

    /// Default UDP port for audio streaming
    pub const DEFAULT_STREAM_PORT: u16 = 6980;

    /// Default channel count (mono)
    pub const DEFAULT_CHANNELS: u16 = 1;

    /// Default samples per frame (≈2.67 ms at 48 kHz)
    pub const DEFAULT_SAMPLES_PER_FRAME: usize = 128;

    /// UDP send buffer size requested from the OS
    pub const SEND_BUFFER_SIZE: usize = 256 * 1024;
}
