//! Per-session stream configuration
//!
//! A [`StreamConfig`] is created once when a session starts and never
//! mutated afterwards; every derived quantity (frame size, pacing interval)
//! is computed from it.

use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

use crate::constants::*;
use crate::error::{Error, NetworkError, Result};

/// Immutable per-session stream parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Stream name carried in every packet header
    pub stream_name: String,

    /// Destination IP address or hostname
    pub stream_ip: String,

    /// Destination UDP port
    pub stream_port: u16,

    /// Number of interleaved channels
    pub channels: u16,

    /// Samples per channel in one frame
    pub samples_per_frame: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            stream_name: DEFAULT_STREAM_NAME.to_string(),
            stream_ip: DEFAULT_STREAM_IP.to_string(),
            stream_port: DEFAULT_STREAM_PORT,
            channels: DEFAULT_CHANNELS,
            samples_per_frame: DEFAULT_SAMPLES_PER_FRAME,
        }
    }
}

impl StreamConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the platform config directory, falling back to defaults
    /// when no file exists.
    pub fn load_or_default() -> Result<Self> {
        if let Some(dirs) = directories::ProjectDirs::from("", "", "pcmcast") {
            let path = dirs.config_dir().join("stream.toml");
            if path.exists() {
                return Self::from_file(path);
            }
        }
        Ok(Self::default())
    }

    /// Check that the configuration describes a usable session
    pub fn validate(&self) -> Result<()> {
        if self.stream_name.is_empty() {
            return Err(Error::Config("stream name must not be empty".into()));
        }
        if !self.stream_name.is_ascii() {
            return Err(Error::Config(format!(
                "stream name must be ASCII: {:?}",
                self.stream_name
            )));
        }
        if self.channels == 0 {
            return Err(Error::Config("channel count must be non-zero".into()));
        }
        if self.samples_per_frame == 0 {
            return Err(Error::Config("samples_per_frame must be non-zero".into()));
        }
        Ok(())
    }

    /// Resolve the destination socket address
    pub fn dest_addr(&self) -> std::result::Result<SocketAddr, NetworkError> {
        (self.stream_ip.as_str(), self.stream_port)
            .to_socket_addrs()
            .map_err(|e| NetworkError::InvalidAddress(e.to_string()))?
            .next()
            .ok_or_else(|| {
                NetworkError::InvalidAddress(format!(
                    "{}:{} did not resolve",
                    self.stream_ip, self.stream_port
                ))
            })
    }

    /// Interleaved samples in one frame (all channels)
    pub fn frame_samples(&self) -> usize {
        self.channels as usize * self.samples_per_frame
    }

    /// Payload size of one frame in bytes
    pub fn frame_bytes(&self) -> usize {
        self.frame_samples() * BYTES_PER_SAMPLE
    }

    /// Nominal duration of one frame at the protocol rate
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(self.samples_per_frame as f64 / PROTOCOL_SAMPLE_RATE as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_protocol() {
        let config = StreamConfig::default();
        assert_eq!(config.stream_port, 6980);
        assert_eq!(config.channels, 1);
        assert_eq!(config.samples_per_frame, 128);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_sizes() {
        let config = StreamConfig {
            channels: 2,
            samples_per_frame: 256,
            ..Default::default()
        };
        assert_eq!(config.frame_samples(), 512);
        assert_eq!(config.frame_bytes(), 1024);

        // 256 samples at 48 kHz is 16/3 ms
        let interval = config.frame_interval();
        assert!((interval.as_secs_f64() - 256.0 / 48_000.0).abs() < 1e-12);
    }

    #[test]
    fn test_validation_rejects_bad_configs() {
        let mut config = StreamConfig::default();
        config.channels = 0;
        assert!(config.validate().is_err());

        let mut config = StreamConfig::default();
        config.samples_per_frame = 0;
        assert!(config.validate().is_err());

        let mut config = StreamConfig::default();
        config.stream_name = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dest_addr_resolution() {
        let config = StreamConfig::default();
        let addr = config.dest_addr().unwrap();
        assert_eq!(addr.port(), 6980);

        let config = StreamConfig {
            stream_ip: "definitely not an address".into(),
            ..Default::default()
        };
        assert!(config.dest_addr().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = StreamConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: StreamConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.stream_name, config.stream_name);
        assert_eq!(parsed.samples_per_frame, config.samples_per_frame);
    }
}
