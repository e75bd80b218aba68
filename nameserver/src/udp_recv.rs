use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::error;

pub async fn udp_recv(socket: &UdpSocket, buf: &mut [u8]) -> Option<(usize, SocketAddr)> {
    match socket.recv_from(buf).await {
        Ok(received) => {
            Some(received)
        }
        Err(e) => {
            // An ICMP port unreachable for an earlier reply is reported on the
            // next receive. It says nothing about the socket itself.
            if is_connection_error(&e) {
                return None;
            }

            error!(error = %e, "UDP receive error");
            tokio::time::sleep(Duration::from_millis(100)).await;
            None
        }
    }
}

fn is_connection_error(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::ConnectionReset
    )
}
