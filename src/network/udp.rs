//! UDP socket setup

use socket2::{Domain, Protocol, Socket, Type};
use std::net::{SocketAddr, UdpSocket};

use crate::constants::SEND_BUFFER_SIZE;
use crate::error::NetworkError;

/// Create a send-only UDP socket bound to an ephemeral local port.
///
/// The socket family follows the destination address. The enlarged send
/// buffer request is best-effort; some platforms clamp it.
pub fn create_send_socket(dest: &SocketAddr) -> Result<UdpSocket, NetworkError> {
    let domain = if dest.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))
        .map_err(|e| NetworkError::BindFailed(e.to_string()))?;

    let _ = socket.set_send_buffer_size(SEND_BUFFER_SIZE);

    let bind_addr: SocketAddr = if dest.is_ipv4() {
        (std::net::Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
    };
    socket
        .bind(&bind_addr.into())
        .map_err(|e| NetworkError::BindFailed(e.to_string()))?;

    Ok(socket.into())
}
