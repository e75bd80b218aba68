use crate::error::{EncodeError, ParseError};
use crate::reader::Reader;
use crate::writer::Writer;

const AUTHORITATIVE: u8 = 0b0000_0100;
const TRUNCATED: u8 = 0b0000_0010;
const RESPONSE_CODE_MASK: u8 = 0b0000_1111;

/// The 12 byte message header.
///
/// Only AA, TC and RCODE are kept from the flag bytes; the other bits are
/// dropped on decode and written as zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    id: u16,
    authoritative: bool,
    truncated: bool,
    response_code: u8,
    qdcount: u16,
    ancount: u16,
    nscount: u16,
    arcount: u16,
}

impl Header {
    pub fn new(id: u16, question_count: u16) -> Self {
        Self {
            id,
            authoritative: false,
            truncated: false,
            response_code: 0,
            qdcount: question_count,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    /// Header of the response to `request`: same id and question count,
    /// authoritative, everything else cleared.
    pub fn for_response(request: &Header) -> Self {
        Self {
            authoritative: true,
            ..Self::new(request.id, request.qdcount)
        }
    }

    pub fn to_bytes(&self, w: &mut Writer) -> Result<(), EncodeError> {
        let mut flags = 0;
        if self.authoritative {
            flags |= AUTHORITATIVE;
        }
        if self.truncated {
            flags |= TRUNCATED;
        }

        w.write_u16(self.id)?;
        w.write_u8(flags)?;
        w.write_u8(self.response_code & RESPONSE_CODE_MASK)?;
        w.write_u16(self.qdcount)?;
        w.write_u16(self.ancount)?;
        w.write_u16(self.nscount)?;
        w.write_u16(self.arcount)?;

        Ok(())
    }

    pub fn parse_from_reader(rdr: &mut Reader) -> Result<Self, ParseError> {
        let id = rdr.read_u16()?;
        let flags = rdr.read_u8()?;
        let response_code = rdr.read_u8()? & RESPONSE_CODE_MASK;
        let qdcount = rdr.read_u16()?;
        let ancount = rdr.read_u16()?;
        let nscount = rdr.read_u16()?;
        let arcount = rdr.read_u16()?;

        let h = Self {
            id,
            authoritative: flags & AUTHORITATIVE != 0,
            truncated: flags & TRUNCATED != 0,
            response_code,
            qdcount,
            ancount,
            nscount,
            arcount,
        };

        Ok(h)
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn authoritative(&self) -> bool {
        self.authoritative
    }

    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn response_code(&self) -> u8 {
        self.response_code
    }

    pub fn qd_count(&self) -> u16 {
        self.qdcount
    }

    pub fn answer_count(&self) -> u16 {
        self.ancount
    }

    pub fn authority_count(&self) -> u16 {
        self.nscount
    }

    pub fn additional_count(&self) -> u16 {
        self.arcount
    }

    pub fn set_answer_count(&mut self, count: u16) {
        self.ancount = count;
    }

    /// Counts for a message carrying only questions and answers; the
    /// authority and additional sections are never encoded.
    pub(crate) fn set_section_counts(&mut self, question_count: u16, answer_count: u16) {
        self.qdcount = question_count;
        self.ancount = answer_count;
        self.nscount = 0;
        self.arcount = 0;
    }

    pub(crate) fn set_truncated(&mut self, truncated: bool) {
        self.truncated = truncated;
    }
}
