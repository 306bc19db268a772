use super::RecordType;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

/// Record payload for the sentinel answers this server synthesizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    TXT(Arc<str>),
}

impl RData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RData::A(_) => RecordType::A,
            RData::AAAA(_) => RecordType::AAAA,
            RData::TXT(_) => RecordType::TXT,
        }
    }

    /// Length of the encoded RDATA in octets.
    pub fn wire_len(&self) -> usize {
        match self {
            RData::A(_) => 4,
            RData::AAAA(_) => 16,
            // one length octet per <=255-octet character-string
            RData::TXT(text) => {
                let len = text.len();
                if len == 0 {
                    1
                } else {
                    len + len.div_ceil(255)
                }
            }
        }
    }
}

/// A resource record of the answer section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Arc<str>,

    pub class: u16,

    pub ttl: u32,

    pub rdata: RData,
}

impl ResourceRecord {
    pub fn new(name: impl Into<Arc<str>>, ttl: u32, rdata: RData) -> Self {
        Self {
            name: name.into(),
            class: crate::dns_message::CLASS_IN,
            ttl,
            rdata,
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.rdata.record_type()
    }
}
