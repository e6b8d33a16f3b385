//! Real-time pacing sender
//!
//! The core transmission loop: exactly one datagram per fixed interval,
//! indefinitely, substituting silence whenever no data frame is available
//! or playback is paused. Runs on its own dedicated thread.

use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::audio::frame::Frame;
use crate::audio::queue::{PauseGate, StreamQueue};
use crate::config::StreamConfig;
use crate::protocol::{assemble_packet, HeaderEncoder};

/// Transmission counters shared with the controlling thread
#[derive(Debug, Default)]
pub struct SenderStats {
    packets_sent: AtomicU64,
    data_frames: AtomicU64,
    silence_frames: AtomicU64,
    bytes_sent: AtomicU64,
}

impl SenderStats {
    pub fn snapshot(&self) -> SenderStatsSnapshot {
        SenderStatsSnapshot {
            packets_sent: self.packets_sent.load(Ordering::Relaxed),
            data_frames: self.data_frames.load(Ordering::Relaxed),
            silence_frames: self.silence_frames.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`SenderStats`]
#[derive(Debug, Clone, Copy)]
pub struct SenderStatsSnapshot {
    pub packets_sent: u64,
    pub data_frames: u64,
    pub silence_frames: u64,
    pub bytes_sent: u64,
}

/// The paced transmission loop for one session
pub struct PacingSender {
    socket: UdpSocket,
    dest: SocketAddr,
    config: StreamConfig,
    header: Arc<dyn HeaderEncoder>,
    queue: Arc<StreamQueue>,
    pause: Arc<PauseGate>,
    running: Arc<AtomicBool>,
    stats: Arc<SenderStats>,
    frame_counter: u32,
    silence: Frame,
    interval: Duration,
}

impl PacingSender {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        socket: UdpSocket,
        dest: SocketAddr,
        config: StreamConfig,
        header: Arc<dyn HeaderEncoder>,
        queue: Arc<StreamQueue>,
        pause: Arc<PauseGate>,
        running: Arc<AtomicBool>,
        stats: Arc<SenderStats>,
    ) -> Self {
        let silence = Frame::silence(config.channels, config.samples_per_frame);
        let interval = config.frame_interval();
        Self {
            socket,
            dest,
            config,
            header,
            queue,
            pause,
            running,
            stats,
            frame_counter: 0,
            silence,
            interval,
        }
    }

    /// Run the transmission loop until the running flag clears or a send
    /// fails.
    ///
    /// Each cycle's deadline is measured from that cycle's own start;
    /// overruns are never made up in later cycles, so long streams can
    /// drift relative to an absolute schedule.
    pub fn run(mut self) {
        tracing::info!(
            dest = %self.dest,
            interval_us = self.interval.as_micros() as u64,
            "pacing sender started"
        );

        while self.running.load(Ordering::SeqCst) {
            let cycle_start = Instant::now();

            // Paused cycles never dequeue; the queue keeps accumulating.
            let dequeued = if self.pause.get() {
                None
            } else {
                self.queue.try_dequeue()
            };
            let is_data = dequeued.is_some();
            let payload = dequeued.unwrap_or_else(|| self.silence.clone());

            let header = self.header.encode_header(&self.config, self.frame_counter);
            let packet = assemble_packet(&header, payload.as_bytes());

            if let Err(e) = self.socket.send_to(&packet, self.dest) {
                // Fatal: no retry, no restart. The cleared flag is the only
                // trace the caller can observe.
                tracing::error!("send failed, stopping sender: {}", e);
                self.running.store(false, Ordering::SeqCst);
                return;
            }

            self.frame_counter = self.frame_counter.wrapping_add(1);

            self.stats.packets_sent.fetch_add(1, Ordering::Relaxed);
            self.stats
                .bytes_sent
                .fetch_add(packet.len() as u64, Ordering::Relaxed);
            if is_data {
                self.stats.data_frames.fetch_add(1, Ordering::Relaxed);
            } else {
                self.stats.silence_frames.fetch_add(1, Ordering::Relaxed);
            }

            spin_until(cycle_start + self.interval);
        }

        tracing::info!("pacing sender stopped");
    }
}

/// Busy-wait until `deadline` on the monotonic clock.
///
/// Target intervals are low-millisecond (≈2.67 ms for 128-sample frames at
/// 48 kHz); OS sleep granularity would introduce jitter exceeding the
/// interval itself, so the wait spins.
fn spin_until(deadline: Instant) {
    while Instant::now() < deadline {
        std::hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_until_reaches_deadline() {
        let target = Duration::from_millis(2);
        let start = Instant::now();
        spin_until(start + target);

        let elapsed = start.elapsed();
        assert!(elapsed >= target);
        assert!(elapsed < target + Duration::from_millis(20));
    }

    #[test]
    fn test_spin_until_past_deadline_returns_immediately() {
        let start = Instant::now();
        spin_until(start - Duration::from_millis(5));
        assert!(start.elapsed() < Duration::from_millis(5));
    }
}
