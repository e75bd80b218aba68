use thiserror::Error;

/// Failure while decoding a received datagram.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("read past the end of the datagram")]
    Truncated,

    #[error("invalid label")]
    InvalidLabel,

    #[error("invalid compression pointer")]
    InvalidPointer,

    #[error("domain name longer than 255 octets")]
    NameTooLong,

    #[error("record data length does not match its payload")]
    InvalidRecordLength,
}

/// Failure while packing a message into the output buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("message does not fit in the output buffer")]
    BufferFull,

    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),

    #[error("invalid label: {0:?}")]
    InvalidLabel(String),

    #[error("domain name longer than 255 octets")]
    NameTooLong,

    #[error("offset {0} was never reserved")]
    UnreservedOffset(usize),
}
