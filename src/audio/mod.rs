//! Audio subsystem module

pub mod encoder;
pub mod frame;
pub mod queue;
pub mod resample;

pub use encoder::FrameEncoder;
pub use frame::Frame;
pub use queue::{PauseGate, SharedQueue, StreamQueue};
