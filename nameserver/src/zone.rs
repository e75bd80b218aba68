use configuration::{RecordConfiguration, RecordKind, ZoneConfiguration};
use dns::{DomainName, EncodeError, RequestMessage, ResourceRecord, ResponseMessage, Writer};
use thiserror::Error;

use crate::handler::RequestHandler;

#[derive(Error, Debug)]
pub enum ZoneError {
    #[error("MX record for {0} has no preference")]
    MissingPreference(String),

    #[error("A record for {name}: {source}")]
    InvalidAddress {
        name: String,
        #[source]
        source: EncodeError,
    },

    #[error("invalid domain name {name:?}: {source}")]
    InvalidName {
        name: String,
        #[source]
        source: EncodeError,
    },
}

/// Static, read-only zone table.
///
/// Every question is answered with the configured records whose owner name
/// and type match it, in configuration order.
#[derive(Debug, Default)]
pub struct ZoneHandler {
    records: Vec<ResourceRecord>,
}

impl ZoneHandler {
    pub fn new(records: Vec<ResourceRecord>) -> Self {
        Self { records }
    }

    pub fn from_config(config: &ZoneConfiguration) -> Result<Self, ZoneError> {
        let records = config
            .records
            .iter()
            .map(to_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RequestHandler for ZoneHandler {
    fn handle(&self, request: &RequestMessage) -> ResponseMessage {
        let mut response = ResponseMessage::from_request(request);

        for question in request.questions() {
            let matching = self
                .records
                .iter()
                .filter(|r| r.type_code() == question.qtype() && r.name() == question.name());
            for record in matching {
                response.add_answer(record.clone());
            }
        }

        response
    }
}

fn checked_name(name: &str) -> Result<DomainName, ZoneError> {
    let domain = DomainName::new(name);
    Writer::new()
        .write_name(&domain)
        .map_err(|source| ZoneError::InvalidName {
            name: name.to_string(),
            source,
        })?;

    Ok(domain)
}

fn to_record(config: &RecordConfiguration) -> Result<ResourceRecord, ZoneError> {
    let name = checked_name(&config.name)?;

    let record = match config.kind {
        RecordKind::A => {
            dns::parse_ipv4(&config.value).map_err(|source| ZoneError::InvalidAddress {
                name: config.name.clone(),
                source,
            })?;
            ResourceRecord::address(name, config.ttl, &config.value)
        }
        RecordKind::Mx => {
            let preference = config
                .preference
                .ok_or_else(|| ZoneError::MissingPreference(config.name.clone()))?;
            ResourceRecord::mail_exchange(name, config.ttl, preference, checked_name(&config.value)?)
        }
        RecordKind::Ptr => ResourceRecord::pointer(name, config.ttl, checked_name(&config.value)?),
        RecordKind::Cname => {
            ResourceRecord::canonical_name(name, config.ttl, checked_name(&config.value)?)
        }
    };

    Ok(record)
}
