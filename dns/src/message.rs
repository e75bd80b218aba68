use std::convert::TryFrom;

use crate::error::{EncodeError, ParseError};
use crate::header::Header;
use crate::question::Question;
use crate::reader::Reader;
use crate::writer::Writer;

/// Header and question section, shared by requests and responses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub(crate) header: Header,
    pub(crate) questions: Vec<Question>,
}

impl Message {
    pub(crate) fn new(header: Header, questions: Vec<Question>) -> Self {
        Self { header, questions }
    }

    pub(crate) fn parse_from_reader(rdr: &mut Reader) -> Result<Self, ParseError> {
        let header = Header::parse_from_reader(rdr)?;

        // every question takes at least 5 bytes, don't trust QDCOUNT for the allocation
        let count = usize::from(header.qd_count());
        let mut questions = Vec::with_capacity(count.min(rdr.remaining() / 5));
        for _ in 0..count {
            questions.push(Question::parse_from_reader(rdr)?);
        }

        Ok(Self { header, questions })
    }

    /// Writes the header with counts taken from what is actually encoded,
    /// not from whatever was decoded off the wire.
    pub(crate) fn to_bytes(&self, w: &mut Writer, answer_count: u16) -> Result<(), EncodeError> {
        let question_count = u16::try_from(self.questions.len()).map_err(|_| EncodeError::BufferFull)?;
        let mut header = self.header.clone();
        header.set_section_counts(question_count, answer_count);

        header.to_bytes(w)?;
        for question in &self.questions {
            question.to_bytes(w)?;
        }

        Ok(())
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
