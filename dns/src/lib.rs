//! Wire format codec for DNS messages carried over UDP.
//!
//! https://datatracker.ietf.org/doc/html/rfc1035#section-4

mod domain_name;
mod error;
mod header;
mod message;
mod question;
mod reader;
mod request_message;
mod resource_record;
mod response_message;
mod writer;

use bytes::Bytes;

pub use domain_name::{DomainName, MAX_LABEL_LENGTH, MAX_NAME_LENGTH};
pub use error::{EncodeError, ParseError};
pub use header::Header;
pub use message::Message;
pub use question::Question;
pub use reader::Reader;
pub use request_message::RequestMessage;
pub use resource_record::{
    parse_ipv4, RecordData, ResourceRecord, CLASS_IN, TYPE_A, TYPE_CNAME, TYPE_MX, TYPE_PTR,
};
pub use response_message::ResponseMessage;
pub use writer::{Writer, MAX_MESSAGE_SIZE};

pub fn encode_request(id: u16, domain: &str, qtype: u16) -> Result<Bytes, EncodeError> {
    let request_msg = RequestMessage::query(id, DomainName::new(domain), qtype);
    request_msg.pack()
}

pub fn decode_response(response_bytes: &[u8]) -> Result<ResponseMessage, ParseError> {
    ResponseMessage::decode(response_bytes, response_bytes.len())
}

/// Maps a record type mnemonic to its type code.
pub fn type_code(mnemonic: &str) -> Option<u16> {
    let code = match mnemonic.to_ascii_uppercase().as_str() {
        "A" => TYPE_A,
        "CNAME" => TYPE_CNAME,
        "PTR" => TYPE_PTR,
        "MX" => TYPE_MX,
        _ => return None,
    };
    Some(code)
}
