//! Session façade
//!
//! [`StreamController`] owns the producer side of a streaming session:
//! encoding and enqueueing audio, pause control, queue inspection, and the
//! lifecycle of the dedicated sender thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::audio::encoder::FrameEncoder;
use crate::audio::queue::{PauseGate, SharedQueue, StreamQueue};
use crate::config::StreamConfig;
use crate::constants::PROTOCOL_SAMPLE_RATE;
use crate::error::{Error, Result};
use crate::network::sender::{PacingSender, SenderStats, SenderStatsSnapshot};
use crate::network::udp::create_send_socket;
use crate::protocol::HeaderEncoder;

/// Producer-side coordinator for one outgoing stream
pub struct StreamController {
    config: StreamConfig,
    encoder: FrameEncoder,
    header: Arc<dyn HeaderEncoder>,
    queue: SharedQueue,
    pause: Arc<PauseGate>,
    running: Arc<AtomicBool>,
    stats: Arc<SenderStats>,
    sender_handle: Option<JoinHandle<()>>,
}

impl StreamController {
    /// Create a controller for `config`, with the transport's header
    /// encoding supplied by `header`.
    pub fn new(config: StreamConfig, header: Arc<dyn HeaderEncoder>) -> Result<Self> {
        config.validate()?;
        let encoder = FrameEncoder::new(config.channels, config.samples_per_frame);
        Ok(Self {
            config,
            encoder,
            header,
            queue: Arc::new(StreamQueue::new()),
            pause: Arc::new(PauseGate::new()),
            running: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(SenderStats::default()),
            sender_handle: None,
        })
    }

    /// Bind a socket and spawn the sender thread. The frame counter and
    /// transmission stats start from zero for each session.
    pub fn start(&mut self) -> Result<()> {
        if self.running.load(Ordering::SeqCst) {
            return Err(Error::AlreadyRunning);
        }

        let dest = self.config.dest_addr()?;
        let socket = create_send_socket(&dest)?;

        self.stats = Arc::new(SenderStats::default());
        let sender = PacingSender::new(
            socket,
            dest,
            self.config.clone(),
            self.header.clone(),
            self.queue.clone(),
            self.pause.clone(),
            self.running.clone(),
            self.stats.clone(),
        );

        self.running.store(true, Ordering::SeqCst);
        let handle = match std::thread::Builder::new()
            .name("pacing-sender".to_string())
            .spawn(move || sender.run())
        {
            Ok(handle) => handle,
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                return Err(e.into());
            }
        };
        self.sender_handle = Some(handle);

        tracing::info!(stream = %self.config.stream_name, %dest, "stream started");
        Ok(())
    }

    /// Stop the sender thread. Queued frames are neither flushed nor
    /// transmitted; no final silence packet is sent.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.sender_handle.take() {
            let _ = handle.join();
            tracing::info!(stream = %self.config.stream_name, "stream stopped");
        }
    }

    /// Encode `samples` (interleaved f32 at `sample_rate`) and enqueue the
    /// resulting frames; returns how many frames were enqueued.
    ///
    /// With `blocking` set, the calling thread sleeps for the nominal
    /// playback duration of those frames. The sleep is a timing
    /// approximation only, not a confirmation that the sender transmitted
    /// them.
    pub fn play_audio(&self, samples: &[f32], sample_rate: u32, blocking: bool) -> Result<usize> {
        let frames = self.encoder.encode(samples, sample_rate)?;
        let count = frames.len();
        for frame in frames {
            self.queue.enqueue(frame);
        }
        tracing::debug!(frames = count, queue_len = self.queue.len(), "audio enqueued");

        if blocking && count > 0 {
            let nominal = count as f64 * self.config.samples_per_frame as f64
                / PROTOCOL_SAMPLE_RATE as f64;
            std::thread::sleep(Duration::from_secs_f64(nominal));
        }
        Ok(count)
    }

    /// Pause, drain, unpause; returns the number of frames dropped. The
    /// three steps are not atomic: frames enqueued concurrently during the
    /// drain may survive it.
    pub fn clear_queue(&self) -> usize {
        self.pause.set(true);
        let drained = self.queue.drain();
        self.pause.set(false);
        tracing::debug!(drained, "queue cleared");
        drained
    }

    /// Current queue length; best-effort under concurrent mutation
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn set_pause(&self, paused: bool) {
        self.pause.set(paused);
    }

    pub fn is_paused(&self) -> bool {
        self.pause.get()
    }

    /// True while the sender thread is alive. Flips to false on `stop()`
    /// and when the sender dies on a transmission failure.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> SenderStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }
}

impl Drop for StreamController {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::time::Instant;

    struct NullHeader;

    impl HeaderEncoder for NullHeader {
        fn encode_header(&self, _config: &StreamConfig, frame_counter: u32) -> Bytes {
            Bytes::copy_from_slice(&frame_counter.to_le_bytes())
        }
    }

    fn controller(config: StreamConfig) -> StreamController {
        StreamController::new(config, Arc::new(NullHeader)).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = StreamConfig {
            channels: 0,
            ..Default::default()
        };
        assert!(StreamController::new(config, Arc::new(NullHeader)).is_err());
    }

    #[test]
    fn test_play_audio_enqueues_whole_frames() {
        let controller = controller(StreamConfig::default());

        let enqueued = controller
            .play_audio(&vec![0.5f32; 128 * 3 + 7], 48_000, false)
            .unwrap();

        assert_eq!(enqueued, 3);
        assert_eq!(controller.queue_len(), 3);
    }

    #[test]
    fn test_blocking_play_sleeps_nominal_duration() {
        let controller = controller(StreamConfig::default());

        let start = Instant::now();
        let enqueued = controller
            .play_audio(&vec![0.5f32; 128 * 4], 48_000, true)
            .unwrap();
        let elapsed = start.elapsed();

        assert_eq!(enqueued, 4);
        // 4 frames of 128 samples at 48 kHz is ~10.7 ms
        assert!(elapsed >= Duration::from_secs_f64(4.0 * 128.0 / 48_000.0));
    }

    #[test]
    fn test_clear_queue_unpauses() {
        let controller = controller(StreamConfig::default());
        controller.play_audio(&vec![0.5f32; 128 * 5], 48_000, false).unwrap();

        let drained = controller.clear_queue();

        assert_eq!(drained, 5);
        assert_eq!(controller.queue_len(), 0);
        assert!(!controller.is_paused());
    }

    #[test]
    fn test_start_twice_is_an_error() {
        let mut controller = controller(StreamConfig::default());

        controller.start().unwrap();
        assert!(controller.is_running());
        assert!(matches!(controller.start(), Err(Error::AlreadyRunning)));

        controller.stop();
        assert!(!controller.is_running());
    }

    #[test]
    fn test_restart_after_stop() {
        let mut controller = controller(StreamConfig::default());

        controller.start().unwrap();
        controller.stop();
        controller.start().unwrap();
        assert!(controller.is_running());
        controller.stop();
    }
}
