extern crate tokio;

use std::error::Error;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;
use dns::{RecordData, ResponseMessage, MAX_MESSAGE_SIZE};
use log::{debug, info};
use tokio::net::UdpSocket;

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::try_init();

    let server = std::env::args().nth(1).unwrap_or("127.0.0.1:5353".to_string());
    let server_addr = server.parse::<SocketAddr>()?;
    let domain = std::env::args().nth(2).unwrap_or("ahlquist.com".to_string());
    let qtype_name = std::env::args().nth(3).unwrap_or("A".to_string());
    let qtype = dns::type_code(&qtype_name).ok_or_else(|| format!("unsupported type: {}", qtype_name))?;

    let id = (std::process::id() & 0xffff) as u16;
    let request_bytes = dns::encode_request(id, &domain, qtype)?;

    let local_addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0);
    let sock = UdpSocket::bind(local_addr).await?;
    sock.send_to(&request_bytes, server_addr).await?;
    info!("Sent {} {} query to {}", domain, qtype_name, server_addr);

    let mut resp_buf = [0u8; MAX_MESSAGE_SIZE];
    let response_size = tokio::time::timeout(TIMEOUT, sock.recv(&mut resp_buf)).await??;
    let response_bytes = &resp_buf[0..response_size];
    debug!("received udp response, length: {}, {:?}", response_size, response_bytes);

    let resp = dns::decode_response(response_bytes)?;
    if resp.header().id() != id {
        return Err(format!("response id {} does not match query id {}", resp.header().id(), id).into());
    }

    print_response(&resp);

    Ok(())
}

fn print_response(resp: &ResponseMessage) {
    let header = resp.header();
    println!(
        "id: {}, rcode: {}, authoritative: {}, truncated: {}, answers: {}",
        header.id(),
        header.response_code(),
        header.authoritative(),
        header.truncated(),
        header.answer_count()
    );

    for record in resp.answers() {
        let data = match record.data() {
            RecordData::Address { address } => format!("A {}", address),
            RecordData::MailExchange { preference, exchange } => format!("MX {} {}", preference, exchange),
            RecordData::Pointer { target } => format!("PTR {}", target),
            RecordData::CanonicalName { target } => format!("CNAME {}", target),
            RecordData::Unknown { type_code, data } => format!("TYPE{} ({} bytes)", type_code, data.len()),
        };
        println!("{}\t{}\t{}", record.name(), record.ttl(), data);
    }
}
