//! Error types for the streaming pipeline

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sender is already running")]
    AlreadyRunning,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Frame encoding errors
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Resampler initialization failed: {0}")]
    ResamplerInit(String),

    #[error("Resampling failed: {0}")]
    ResampleFailed(String),

    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(u32),
}

/// Network errors
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Socket bind failed: {0}")]
    BindFailed(String),

    #[error("Invalid destination address: {0}")]
    InvalidAddress(String),

    #[error("Send failed: {0}")]
    SendFailed(String),
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;
