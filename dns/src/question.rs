use crate::domain_name::DomainName;
use crate::error::{EncodeError, ParseError};
use crate::reader::Reader;
use crate::resource_record::CLASS_IN;
use crate::writer::Writer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    name: DomainName,
    qtype: u16,
    qclass: u16,
}

impl Question {
    pub fn new(name: DomainName, qtype: u16) -> Self {
        Self {
            name,
            qtype,
            qclass: CLASS_IN,
        }
    }

    pub fn to_bytes(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_name(&self.name)?;
        w.write_u16(self.qtype)?;
        w.write_u16(self.qclass)?;

        Ok(())
    }

    /// The type is not checked against the known record types, so unknown
    /// queries survive a decode/encode cycle unchanged.
    pub fn parse_from_reader(rdr: &mut Reader) -> Result<Self, ParseError> {
        let name = rdr.read_name()?;
        let qtype = rdr.read_u16()?;
        let qclass = rdr.read_u16()?;

        let q = Self {
            name,
            qtype,
            qclass,
        };

        Ok(q)
    }

    pub fn name(&self) -> &DomainName {
        &self.name
    }

    pub fn qtype(&self) -> u16 {
        self.qtype
    }

    pub fn qclass(&self) -> u16 {
        self.qclass
    }
}
