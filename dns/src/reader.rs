use byteorder::{ByteOrder, BE};

use crate::domain_name::{DomainName, MAX_NAME_LENGTH};
use crate::error::ParseError;

const POINTER_MASK: u8 = 0b1100_0000;

/// Sequential reader over a received datagram.
///
/// Every primitive checks the declared length before touching the buffer,
/// so malformed input surfaces as `ParseError::Truncated` instead of a panic.
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// `length` is the number of valid bytes, which may be smaller than the
    /// slice (e.g. a receive buffer that was only partly filled).
    pub fn new(bytes: &'a [u8], length: usize) -> Self {
        let length = length.min(bytes.len());
        Self {
            bytes: &bytes[..length],
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.bytes.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ParseError> {
        let end = self.position.checked_add(n).ok_or(ParseError::Truncated)?;
        let slice = self
            .bytes
            .get(self.position..end)
            .ok_or(ParseError::Truncated)?;
        self.position = end;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, ParseError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ParseError> {
        Ok(BE::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, ParseError> {
        Ok(BE::read_u32(self.take(4)?))
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ParseError> {
        self.take(n)
    }

    // https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.4
    //
    // A pointer must refer strictly backwards from where it sits and may not
    // land on an offset already visited for this name, so every name
    // resolves in a bounded number of hops.
    pub fn read_name(&mut self) -> Result<DomainName, ParseError> {
        let mut labels = Vec::new();
        let mut encoded_len = 1;
        let mut resume_at: Option<usize> = None;
        let mut visited: Vec<usize> = Vec::new();

        loop {
            let start = self.position;
            let len = self.read_u8()?;

            match len & POINTER_MASK {
                0 => {
                    if len == 0 {
                        break;
                    }

                    let label = self.take(usize::from(len))?;
                    if !label.is_ascii() {
                        return Err(ParseError::InvalidLabel);
                    }

                    encoded_len += label.len() + 1;
                    if encoded_len > MAX_NAME_LENGTH {
                        return Err(ParseError::NameTooLong);
                    }

                    labels.push(label.iter().map(|&b| char::from(b)).collect());
                }
                POINTER_MASK => {
                    let low = self.read_u8()?;
                    let target = usize::from(BE::read_u16(&[len & !POINTER_MASK, low]));

                    if target >= start || visited.contains(&target) {
                        return Err(ParseError::InvalidPointer);
                    }
                    visited.push(target);

                    if resume_at.is_none() {
                        resume_at = Some(self.position);
                    }
                    self.position = target;
                }
                // 0b01 and 0b10 prefixes are reserved
                _ => return Err(ParseError::InvalidLabel),
            }
        }

        if let Some(position) = resume_at {
            self.position = position;
        }

        Ok(DomainName::from_labels(labels))
    }
}
