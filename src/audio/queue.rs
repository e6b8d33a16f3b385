//! Cross-thread hand-off between producer and sender
//!
//! [`StreamQueue`] is an unbounded lock-free FIFO shared between the
//! producer side (controller) and the sender thread. Unbounded is a
//! deliberate contract: a producer enqueueing faster than the fixed
//! real-time drain rate accumulates latency and memory, mitigated only by
//! an explicit drain.

use crossbeam::queue::SegQueue;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::audio::frame::Frame;

/// Unbounded FIFO of encoded frames, safe for multiple producers and one
/// consumer
pub struct StreamQueue {
    queue: SegQueue<Frame>,
    enqueued_total: AtomicU64,
}

impl StreamQueue {
    pub fn new() -> Self {
        Self {
            queue: SegQueue::new(),
            enqueued_total: AtomicU64::new(0),
        }
    }

    /// Append a frame; never blocks, never fails
    pub fn enqueue(&self, frame: Frame) {
        self.queue.push(frame);
        self.enqueued_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Pop the oldest frame, if any
    pub fn try_dequeue(&self) -> Option<Frame> {
        self.queue.pop()
    }

    /// Current queue length; best-effort under concurrent mutation
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Remove everything currently present and return how many frames were
    /// dropped. Frames enqueued concurrently during the drain may or may
    /// not be removed.
    pub fn drain(&self) -> usize {
        let mut drained = 0;
        while self.queue.pop().is_some() {
            drained += 1;
        }
        drained
    }

    /// Total frames ever enqueued
    pub fn enqueued_total(&self) -> u64 {
        self.enqueued_total.load(Ordering::Relaxed)
    }
}

impl Default for StreamQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe handle to a stream queue
pub type SharedQueue = Arc<StreamQueue>;

/// Shared pause flag, observed by the sender once per cycle.
///
/// Only the storage itself is synchronized; a write racing a cycle may take
/// effect on either side of that cycle's dequeue decision.
pub struct PauseGate {
    paused: AtomicBool,
}

impl PauseGate {
    pub fn new() -> Self {
        Self {
            paused: AtomicBool::new(false),
        }
    }

    pub fn set(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    pub fn get(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }
}

impl Default for PauseGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(value: i16) -> Frame {
        Frame::from_samples(&[value; 8])
    }

    #[test]
    fn test_fifo_order() {
        let queue = StreamQueue::new();
        queue.enqueue(frame(1));
        queue.enqueue(frame(2));
        queue.enqueue(frame(3));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.try_dequeue(), Some(frame(1)));
        assert_eq!(queue.try_dequeue(), Some(frame(2)));
        assert_eq!(queue.try_dequeue(), Some(frame(3)));
        assert_eq!(queue.try_dequeue(), None);
    }

    #[test]
    fn test_drain_empties_queue() {
        let queue = StreamQueue::new();
        for i in 0..10 {
            queue.enqueue(frame(i));
        }

        assert_eq!(queue.drain(), 10);
        assert!(queue.is_empty());
        assert_eq!(queue.enqueued_total(), 10);
    }

    #[test]
    fn test_multiple_producers() {
        let queue = Arc::new(StreamQueue::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let queue = queue.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        queue.enqueue(frame(i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(queue.len(), 400);
        assert_eq!(queue.enqueued_total(), 400);
    }

    #[test]
    fn test_pause_gate_defaults_clear() {
        let gate = PauseGate::new();
        assert!(!gate.get());

        gate.set(true);
        assert!(gate.get());
        gate.set(false);
        assert!(!gate.get());
    }
}
