use std::convert::TryFrom;

use bytes::Bytes;

use crate::error::{EncodeError, ParseError};
use crate::header::Header;
use crate::message::Message;
use crate::question::Question;
use crate::reader::Reader;
use crate::request_message::RequestMessage;
use crate::resource_record::ResourceRecord;
use crate::writer::Writer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseMessage {
    message: Message,
    answer_records: Vec<ResourceRecord>,
}

impl ResponseMessage {
    /// Starts the response to `request`: same id, same questions, no answers.
    pub fn from_request(request: &RequestMessage) -> Self {
        let header = Header::for_response(request.header());
        let questions = request.questions().to_vec();

        Self {
            message: Message::new(header, questions),
            answer_records: Vec::new(),
        }
    }

    // 解析 DNS 的响应
    pub fn decode(bytes: &[u8], length: usize) -> Result<Self, ParseError> {
        let mut reader = Reader::new(bytes, length);
        let message = Message::parse_from_reader(&mut reader)?;

        let count = usize::from(message.header.answer_count());
        let mut answer_records = Vec::with_capacity(count.min(reader.remaining() / 11));
        for _ in 0..count {
            let record = ResourceRecord::parse_from_reader(&mut reader)?;
            answer_records.push(record);
        }

        let msg = Self {
            message,
            answer_records,
        };

        Ok(msg)
    }

    /// No limit is applied here; `pack` reports a response that outgrew the
    /// packet.
    pub fn add_answer(&mut self, record: ResourceRecord) {
        self.answer_records.push(record);
    }

    /// Encodes header, questions and answers in append order.
    pub fn pack(&mut self) -> Result<Bytes, EncodeError> {
        let count = u16::try_from(self.answer_records.len()).map_err(|_| EncodeError::BufferFull)?;
        self.message.header.set_answer_count(count);

        let mut w = Writer::new();
        self.message.to_bytes(&mut w, count)?;
        for record in &self.answer_records {
            record.to_bytes(&mut w)?;
        }

        Ok(w.finish())
    }

    /// Like `pack`, but when the answers do not fit, the trailing ones are
    /// dropped from this response and TC is set. Fails if not even the
    /// header and questions fit.
    pub fn pack_truncated(&mut self) -> Result<Bytes, EncodeError> {
        match self.pack() {
            Err(EncodeError::BufferFull) => {}
            packed => return packed,
        }

        let mut w = Writer::new();
        self.message.to_bytes(&mut w, 0)?;

        let mut fit = 0;
        for record in &self.answer_records {
            match record.to_bytes(&mut w) {
                Ok(()) => fit += 1,
                Err(EncodeError::BufferFull) => break,
                Err(e) => return Err(e),
            }
        }

        self.answer_records.truncate(fit);
        self.message.header.set_truncated(true);
        self.pack()
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

    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answer_records
    }

    pub fn first_address(&self) -> Option<&str> {
        self.addresses().next()
    }

    pub fn last_address(&self) -> Option<&str> {
        self.addresses().last()
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.answer_records.iter().filter_map(|r| r.ip())
    }
}
