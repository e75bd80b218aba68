use bytes::Bytes;

use crate::domain_name::DomainName;
use crate::error::{EncodeError, ParseError};
use crate::header::Header;
use crate::message::Message;
use crate::question::Question;
use crate::reader::Reader;
use crate::writer::Writer;

/// A query, either decoded from a datagram or built to be sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestMessage {
    message: Message,
    trailing_bytes: usize,
}

impl RequestMessage {
    pub fn query(id: u16, name: DomainName, qtype: u16) -> Self {
        let header = Header::new(id, 1);
        let question = Question::new(name, qtype);

        Self {
            message: Message::new(header, vec![question]),
            trailing_bytes: 0,
        }
    }

    /// Decodes the header and QDCOUNT questions from the first `length`
    /// bytes. Any failure rejects the whole datagram. Sections after the
    /// questions are not interpreted.
    pub fn decode(bytes: &[u8], length: usize) -> Result<Self, ParseError> {
        let mut rdr = Reader::new(bytes, length);
        let message = Message::parse_from_reader(&mut rdr)?;

        Ok(Self {
            message,
            trailing_bytes: rdr.remaining(),
        })
    }

    pub fn pack(&self) -> Result<Bytes, EncodeError> {
        let mut w = Writer::new();
        self.message.to_bytes(&mut w, 0)?;

        Ok(w.finish())
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn header(&self) -> &Header {
        self.message.header()
    }

    pub fn questions(&self) -> &[Question] {
        self.message.questions()
    }

    /// Bytes left after the question section, e.g. an EDNS0 OPT record.
    pub fn trailing_bytes(&self) -> usize {
        self.trailing_bytes
    }
}
