use byteorder::{ByteOrder, BE};
use bytes::Bytes;

use crate::domain_name::{DomainName, MAX_LABEL_LENGTH, MAX_NAME_LENGTH};
use crate::error::EncodeError;

// https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1
//
// Messages carried by UDP are restricted to 512 bytes (not counting the IP
// or UDP headers).
pub const MAX_MESSAGE_SIZE: usize = 512;

/// Sequential writer into a fixed 512 byte buffer.
pub struct Writer {
    buf: [u8; MAX_MESSAGE_SIZE],
    position: usize,
}

impl Writer {
    pub fn new() -> Self {
        Self {
            buf: [0; MAX_MESSAGE_SIZE],
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn advance(&mut self, n: usize) -> Result<&mut [u8], EncodeError> {
        let start = self.position;
        let end = start.checked_add(n).ok_or(EncodeError::BufferFull)?;
        if end > MAX_MESSAGE_SIZE {
            return Err(EncodeError::BufferFull);
        }
        self.position = end;
        Ok(&mut self.buf[start..end])
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        self.advance(1)?[0] = value;
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), EncodeError> {
        BE::write_u16(self.advance(2)?, value);
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), EncodeError> {
        BE::write_u32(self.advance(4)?, value);
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.advance(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Skips `n` bytes to be filled in later, returning where they start.
    pub fn reserve(&mut self, n: usize) -> Result<usize, EncodeError> {
        let start = self.position;
        self.advance(n)?;
        Ok(start)
    }

    /// Overwrites two already reserved bytes; the cursor does not move.
    pub fn patch_u16(&mut self, value: u16, at: usize) -> Result<(), EncodeError> {
        let end = at.checked_add(2).ok_or(EncodeError::UnreservedOffset(at))?;
        if end > self.position {
            return Err(EncodeError::UnreservedOffset(at));
        }
        BE::write_u16(&mut self.buf[at..end], value);
        Ok(())
    }

    /// Writes every label in full; compression pointers are never emitted.
    pub fn write_name(&mut self, name: &DomainName) -> Result<(), EncodeError> {
        for label in name.labels() {
            if label.is_empty() || label.len() > MAX_LABEL_LENGTH || !label.is_ascii() {
                return Err(EncodeError::InvalidLabel(label.to_string()));
            }
        }
        if name.encoded_len() > MAX_NAME_LENGTH {
            return Err(EncodeError::NameTooLong);
        }

        for label in name.labels() {
            self.write_u8(label.len() as u8)?;
            self.write_bytes(label.as_bytes())?;
        }
        self.write_u8(0)
    }

    /// Writes a RDLENGTH placeholder, runs `payload`, then backfills the
    /// placeholder with the number of bytes the payload produced.
    pub fn write_length_prefixed<F>(&mut self, payload: F) -> Result<(), EncodeError>
    where
        F: FnOnce(&mut Self) -> Result<(), EncodeError>,
    {
        let at = self.reserve(2)?;
        payload(self)?;
        let len = self.position - at - 2;
        self.patch_u16(len as u16, at)
    }

    pub fn finish(self) -> Bytes {
        Bytes::copy_from_slice(&self.buf[..self.position])
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}
