//! Network subsystem for UDP audio transport

pub mod sender;
pub mod udp;

pub use sender::{PacingSender, SenderStats, SenderStatsSnapshot};
pub use udp::create_send_socket;
