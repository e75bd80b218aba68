use crate::domain_name::DomainName;
use crate::error::{EncodeError, ParseError};
use crate::reader::Reader;
use crate::writer::Writer;

pub const TYPE_A: u16 = 1;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_PTR: u16 = 12;
pub const TYPE_MX: u16 = 15;

pub const CLASS_IN: u16 = 1;

/// Type specific payload of a resource record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordData {
    /// IPv4 address in dotted decimal, validated when the record is written.
    Address { address: String },
    MailExchange { preference: u16, exchange: DomainName },
    Pointer { target: DomainName },
    CanonicalName { target: DomainName },
    /// Any other type, kept as raw RDATA.
    ///
    /// Names inside the data may be compression pointers, which are only
    /// meaningful relative to the message the record was decoded from.
    Unknown { type_code: u16, data: Vec<u8> },
}

impl RecordData {
    pub fn type_code(&self) -> u16 {
        match self {
            RecordData::Address { .. } => TYPE_A,
            RecordData::MailExchange { .. } => TYPE_MX,
            RecordData::Pointer { .. } => TYPE_PTR,
            RecordData::CanonicalName { .. } => TYPE_CNAME,
            RecordData::Unknown { type_code, .. } => *type_code,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceRecord {
    name: DomainName,
    rclass: u16,
    ttl: u32,
    data: RecordData,
}

impl ResourceRecord {
    pub fn new(name: DomainName, ttl: u32, data: RecordData) -> Self {
        Self {
            name,
            rclass: CLASS_IN,
            ttl,
            data,
        }
    }

    pub fn address(name: DomainName, ttl: u32, address: &str) -> Self {
        let data = RecordData::Address {
            address: address.to_string(),
        };
        Self::new(name, ttl, data)
    }

    pub fn mail_exchange(name: DomainName, ttl: u32, preference: u16, exchange: DomainName) -> Self {
        let data = RecordData::MailExchange {
            preference,
            exchange,
        };
        Self::new(name, ttl, data)
    }

    pub fn pointer(name: DomainName, ttl: u32, target: DomainName) -> Self {
        Self::new(name, ttl, RecordData::Pointer { target })
    }

    pub fn canonical_name(name: DomainName, ttl: u32, target: DomainName) -> Self {
        Self::new(name, ttl, RecordData::CanonicalName { target })
    }

    pub fn name(&self) -> &DomainName {
        &self.name
    }

    pub fn type_code(&self) -> u16 {
        self.data.type_code()
    }

    pub fn class(&self) -> u16 {
        self.rclass
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn data(&self) -> &RecordData {
        &self.data
    }

    /// Dotted decimal address of an A record.
    pub fn ip(&self) -> Option<&str> {
        match &self.data {
            RecordData::Address { address } => Some(address),
            _ => None,
        }
    }

    /// Name, type, class and TTL, common to every record type.
    fn write_prefix(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_name(&self.name)?;
        w.write_u16(self.data.type_code())?;
        w.write_u16(self.rclass)?;
        w.write_u32(self.ttl)
    }

    pub fn to_bytes(&self, w: &mut Writer) -> Result<(), EncodeError> {
        match &self.data {
            RecordData::Address { address } => {
                // parsed before anything is written, a bad address leaves no partial record
                let octets = parse_ipv4(address)?;
                self.write_prefix(w)?;
                w.write_u16(octets.len() as u16)?;
                w.write_bytes(&octets)
            }
            RecordData::MailExchange {
                preference,
                exchange,
            } => {
                self.write_prefix(w)?;
                w.write_length_prefixed(|w| {
                    w.write_u16(*preference)?;
                    w.write_name(exchange)
                })
            }
            RecordData::Pointer { target } | RecordData::CanonicalName { target } => {
                self.write_prefix(w)?;
                w.write_length_prefixed(|w| w.write_name(target))
            }
            RecordData::Unknown { data, .. } => {
                self.write_prefix(w)?;
                w.write_length_prefixed(|w| w.write_bytes(data))
            }
        }
    }

    pub fn parse_from_reader(rdr: &mut Reader) -> Result<Self, ParseError> {
        let name = rdr.read_name()?;
        let rtype = rdr.read_u16()?;
        let rclass = rdr.read_u16()?;
        let ttl = rdr.read_u32()?;
        let rdlength = usize::from(rdr.read_u16()?);

        let rdata_start = rdr.position();
        let data = match rtype {
            TYPE_A => {
                if rdlength != 4 {
                    return Err(ParseError::InvalidRecordLength);
                }
                let o = rdr.read_bytes(4)?;
                RecordData::Address {
                    address: format!("{}.{}.{}.{}", o[0], o[1], o[2], o[3]),
                }
            }
            TYPE_MX => {
                let preference = rdr.read_u16()?;
                let exchange = rdr.read_name()?;
                RecordData::MailExchange {
                    preference,
                    exchange,
                }
            }
            TYPE_PTR => RecordData::Pointer {
                target: rdr.read_name()?,
            },
            TYPE_CNAME => RecordData::CanonicalName {
                target: rdr.read_name()?,
            },
            type_code => RecordData::Unknown {
                type_code,
                data: rdr.read_bytes(rdlength)?.to_vec(),
            },
        };

        if rdr.position() - rdata_start != rdlength {
            return Err(ParseError::InvalidRecordLength);
        }

        let record = Self {
            name,
            rclass,
            ttl,
            data,
        };

        Ok(record)
    }
}

/// Parses a dotted decimal IPv4 address; every octet must be 0-255.
pub fn parse_ipv4(address: &str) -> Result<[u8; 4], EncodeError> {
    let invalid = || EncodeError::InvalidAddress(address.to_string());

    let mut octets = [0u8; 4];
    let mut parts = address.split('.');
    for octet in octets.iter_mut() {
        let part = parts.next().ok_or_else(invalid)?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *octet = part.parse().map_err(|_| invalid())?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok(octets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(record: &ResourceRecord) -> Vec<u8> {
        let mut w = Writer::new();
        record.to_bytes(&mut w).unwrap();
        w.finish().to_vec()
    }

    fn decode(bytes: &[u8]) -> Result<ResourceRecord, ParseError> {
        let mut rdr = Reader::new(bytes, bytes.len());
        ResourceRecord::parse_from_reader(&mut rdr)
    }

    #[test]
    fn address_to_bytes_test() {
        let r = ResourceRecord::address(DomainName::new("host.example"), 3600, "10.0.0.1");
        let bytes = encode(&r);

        let expected = [
            4, b'h', b'o', b's', b't', 7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0, // name
            0, 1, // type
            0, 1, // class
            0, 0, 0x0e, 0x10, // ttl
            0, 4, // rdlength
            10, 0, 0, 1, // rdata
        ];
        assert_eq!(bytes, expected.to_vec());
    }

    #[test]
    fn invalid_address_test() {
        for address in ["10.0.0.256", "10.0.0", "10.0.0.1.2", "a.b.c.d", "10..0.1", "+1.0.0.1"].iter() {
            let r = ResourceRecord::address(DomainName::new("host.example"), 60, address);
            let mut w = Writer::new();

            assert_eq!(
                r.to_bytes(&mut w),
                Err(EncodeError::InvalidAddress(address.to_string()))
            );
            assert_eq!(w.position(), 0);
        }
    }

    #[test]
    fn mail_exchange_test() {
        let exchange = DomainName::new("mail.ahlquist.com");
        let r = ResourceRecord::mail_exchange(DomainName::new("ahlquist.com"), 300, 10, exchange.clone());
        let bytes = encode(&r);

        // name(14) type(2) class(2) ttl(4)
        let rdlength = usize::from(u16::from_be_bytes([bytes[22], bytes[23]]));
        assert_eq!(rdlength, 2 + exchange.encoded_len());
        assert_eq!(bytes.len(), 24 + rdlength);

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, r);
        match decoded.data() {
            RecordData::MailExchange { preference, .. } => assert_eq!(*preference, 10),
            other => panic!("unexpected record data: {:?}", other),
        }
    }

    #[test]
    fn pointer_test() {
        let r = ResourceRecord::pointer(DomainName::new("1.2.0.192.in-addr.arpa"), 60, DomainName::new("host.example"));
        let bytes = encode(&r);

        assert_eq!(decode(&bytes).unwrap(), r);
        assert_eq!(r.type_code(), TYPE_PTR);
    }

    #[test]
    fn canonical_name_test() {
        let r = ResourceRecord::canonical_name(DomainName::new("www.example"), 60, DomainName::new("example"));
        let bytes = encode(&r);

        // name(13) type(2) class(2) ttl(4) rdlength(2) rdata(9)
        assert_eq!(&bytes[13..15], &[0, 5]);
        assert_eq!(&bytes[21..23], &[0, 9]);
        assert_eq!(decode(&bytes).unwrap(), r);
    }

    #[test]
    fn unknown_round_trip_test() {
        let data = RecordData::Unknown {
            type_code: 16,
            data: b"\x05hello".to_vec(),
        };
        let r = ResourceRecord::new(DomainName::new("txt.example"), 60, data);
        let bytes = encode(&r);

        assert_eq!(decode(&bytes).unwrap(), r);
    }

    #[test]
    fn address_bad_rdlength_test() {
        let bytes = b"\x00\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x05\x0a\x00\x00\x01\x00";

        assert_eq!(decode(bytes), Err(ParseError::InvalidRecordLength));
    }

    #[test]
    fn name_overruns_rdlength_test() {
        // PTR whose RDLENGTH claims 2 bytes but the name takes 3
        let bytes = b"\x00\x00\x0c\x00\x01\x00\x00\x00\x3c\x00\x02\x01a\x00";

        assert_eq!(decode(bytes), Err(ParseError::InvalidRecordLength));
    }

    #[test]
    fn truncated_rdata_test() {
        let bytes = b"\x00\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x04\x0a\x00";

        assert_eq!(decode(bytes), Err(ParseError::Truncated));
    }

    #[test]
    fn compressed_exchange_test() {
        let mut bytes = b"\x08ahlquist\x03com\x00".to_vec();
        // MX record owned by a pointer to offset 0, exchange "mail" + pointer
        bytes.extend_from_slice(&[0xc0, 0, 0, 15, 0, 1, 0, 0, 0, 60, 0, 9, 0, 5]);
        bytes.extend_from_slice(b"\x04mail\xc0\x00");

        let mut rdr = Reader::new(&bytes, bytes.len());
        rdr.read_name().unwrap();
        let r = ResourceRecord::parse_from_reader(&mut rdr).unwrap();

        assert_eq!(r.name().to_string(), "ahlquist.com");
        assert_eq!(
            r.data(),
            &RecordData::MailExchange {
                preference: 5,
                exchange: DomainName::new("mail.ahlquist.com"),
            }
        );
        assert!(rdr.is_exhausted());
    }

    #[test]
    fn parse_ipv4_test() {
        assert_eq!(parse_ipv4("192.0.2.1").unwrap(), [192, 0, 2, 1]);
        assert_eq!(parse_ipv4("0.0.0.0").unwrap(), [0, 0, 0, 0]);
        assert_eq!(parse_ipv4("255.255.255.255").unwrap(), [255; 4]);
        assert!(parse_ipv4("").is_err());
    }
}
