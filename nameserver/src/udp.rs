use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use configuration::OversizePolicy;
use dns::RequestMessage;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};

use crate::handler::RequestHandler;
use crate::udp_recv::udp_recv;

// https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1
pub const MAX_DATAGRAM_SIZE: usize = dns::MAX_MESSAGE_SIZE;

/// Turns one inbound datagram into the bytes to send back.
///
/// `None` means nothing is sent: the request was malformed or the response
/// could not be packed under `policy`.
pub fn handle_datagram<H>(handler: &H, datagram: &[u8], policy: OversizePolicy) -> Option<Bytes>
where
    H: RequestHandler + ?Sized,
{
    let request = match RequestMessage::decode(datagram, datagram.len()) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, len = datagram.len(), "dropping malformed request");
            return None;
        }
    };

    let id = request.header().id();
    if request.trailing_bytes() > 0 {
        debug!(id, trailing = request.trailing_bytes(), "ignoring bytes after the question section");
    }

    let mut response = handler.handle(&request);
    let packed = match policy {
        OversizePolicy::Truncate => response.pack_truncated(),
        OversizePolicy::Drop => response.pack(),
    };

    match packed {
        Ok(bytes) => {
            debug!(id, answers = response.answers().len(), truncated = response.header().truncated(), "response packed");
            Some(bytes)
        }
        Err(e) => {
            warn!(id, error = %e, "dropping response");
            None
        }
    }
}

/// Answers datagrams on `socket` one at a time until `shutdown` resolves.
///
/// Neither bad input nor socket errors end the loop.
pub async fn serve<H, S>(
    socket: UdpSocket,
    handler: Arc<H>,
    policy: OversizePolicy,
    shutdown: S,
) -> std::io::Result<()>
where
    H: RequestHandler + ?Sized,
    S: Future<Output = ()>,
{
    let local_addr = socket.local_addr()?;
    info!(address = %local_addr, ?policy, "serving DNS over UDP");

    tokio::pin!(shutdown);
    let mut buf = [0u8; MAX_DATAGRAM_SIZE];

    loop {
        let received = tokio::select! {
            _ = &mut shutdown => {
                info!("shutting down");
                return Ok(());
            }
            received = udp_recv(&socket, &mut buf) => received,
        };

        let (len, peer) = match received {
            Some(received) => received,
            None => continue,
        };
        debug!(peer = %peer, len, "received datagram");

        let response = match handle_datagram(handler.as_ref(), &buf[..len], policy) {
            Some(response) => response,
            None => continue,
        };

        if let Err(e) = socket.send_to(&response, peer).await {
            error!(peer = %peer, error = %e, "UDP send error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dns::{DomainName, ResourceRecord, ResponseMessage, TYPE_A};
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn answer_with(count: usize) -> impl Fn(&RequestMessage) -> ResponseMessage {
        move |request: &RequestMessage| {
            let mut response = ResponseMessage::from_request(request);
            for i in 0..count {
                let ip = format!("192.0.2.{}", i);
                response.add_answer(ResourceRecord::address(DomainName::new("ahlquist.com"), 3600, &ip));
            }
            response
        }
    }

    #[test]
    fn handle_datagram_test() {
        let query = dns::encode_request(5, "ahlquist.com", TYPE_A).unwrap();
        let bytes = handle_datagram(&answer_with(1), &query, OversizePolicy::Drop).unwrap();

        let resp = dns::decode_response(&bytes).unwrap();
        assert_eq!(resp.header().id(), 5);
        assert_eq!(resp.first_address(), Some("192.0.2.0"));
    }

    #[test]
    fn malformed_datagram_test() {
        assert!(handle_datagram(&answer_with(1), &[0, 1, 2, 3, 4], OversizePolicy::Truncate).is_none());
    }

    #[test]
    fn oversize_policy_test() {
        let query = dns::encode_request(5, "ahlquist.com", TYPE_A).unwrap();

        assert!(handle_datagram(&answer_with(40), &query, OversizePolicy::Drop).is_none());

        let bytes = handle_datagram(&answer_with(40), &query, OversizePolicy::Truncate).unwrap();
        let resp = dns::decode_response(&bytes).unwrap();
        assert!(resp.header().truncated());
        assert_eq!(resp.answers().len(), 17);
    }

    #[test]
    fn unpackable_response_test() {
        let bad = |request: &RequestMessage| {
            let mut response = ResponseMessage::from_request(request);
            response.add_answer(ResourceRecord::address(DomainName::new("ahlquist.com"), 60, "not an ip"));
            response
        };
        let query = dns::encode_request(5, "ahlquist.com", TYPE_A).unwrap();

        assert!(handle_datagram(&bad, &query, OversizePolicy::Truncate).is_none());
    }

    #[tokio::test]
    async fn serve_test() {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = socket.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();
        let shutdown = async {
            let _ = stopped.await;
        };
        let server = tokio::spawn(serve(socket, Arc::new(answer_with(1)), OversizePolicy::Truncate, shutdown));

        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        // dropped by the server, which keeps going
        client.send_to(&[1, 2, 3, 4, 5], server_addr).await.unwrap();
        let query = dns::encode_request(9, "ahlquist.com", TYPE_A).unwrap();
        client.send_to(&query, server_addr).await.unwrap();

        let mut buf = [0u8; MAX_DATAGRAM_SIZE];
        let (len, _) = tokio::time::timeout(Duration::from_secs(5), client.recv_from(&mut buf))
            .await
            .unwrap()
            .unwrap();
        let resp = dns::decode_response(&buf[..len]).unwrap();
        assert_eq!(resp.header().id(), 9);
        assert_eq!(resp.header().answer_count(), 1);
        assert_eq!(resp.first_address(), Some("192.0.2.0"));

        stop.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
