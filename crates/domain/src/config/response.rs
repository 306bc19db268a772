use crate::dns_message::ResponseCode;
use crate::dns_record::{RData, RecordType};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

/// How a well-formed query for a name that is not listed is answered.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotListedPolicy {
    #[default]
    NxDomain,

    NoError,
}

impl NotListedPolicy {
    pub fn response_code(&self) -> ResponseCode {
        match self {
            Self::NxDomain => ResponseCode::NXDomain,
            Self::NoError => ResponseCode::NoError,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseConfig {
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    #[serde(default)]
    pub not_listed: NotListedPolicy,

    #[serde(default = "default_answerable_types")]
    pub answerable_types: Vec<RecordType>,

    /// Answer type synthesized for a listed QTYPE=ANY query.
    #[serde(default = "default_any_type")]
    pub any_type: RecordType,

    #[serde(default = "default_sentinel_a")]
    pub sentinel_a: Ipv4Addr,

    #[serde(default = "default_sentinel_aaaa")]
    pub sentinel_aaaa: Ipv6Addr,

    #[serde(default = "default_sentinel_txt")]
    pub sentinel_txt: Option<String>,
}

impl ResponseConfig {
    pub fn is_answerable(&self, qtype: RecordType) -> bool {
        self.answerable_types.contains(&qtype)
    }

    /// Concrete type of the answer record for a listed query of `qtype`.
    pub fn answer_type_for(&self, qtype: RecordType) -> RecordType {
        match qtype {
            RecordType::ANY => self.any_type,
            other => other,
        }
    }

    pub fn sentinel_for(&self, record_type: RecordType) -> Option<RData> {
        match record_type {
            RecordType::A => Some(RData::A(self.sentinel_a)),
            RecordType::AAAA => Some(RData::AAAA(self.sentinel_aaaa)),
            RecordType::TXT => self
                .sentinel_txt
                .as_deref()
                .map(|text| RData::TXT(text.into())),
            _ => None,
        }
    }
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            ttl: default_ttl(),
            not_listed: NotListedPolicy::default(),
            answerable_types: default_answerable_types(),
            any_type: default_any_type(),
            sentinel_a: default_sentinel_a(),
            sentinel_aaaa: default_sentinel_aaaa(),
            sentinel_txt: default_sentinel_txt(),
        }
    }
}

fn default_ttl() -> u32 {
    300
}

fn default_answerable_types() -> Vec<RecordType> {
    vec![RecordType::A, RecordType::AAAA, RecordType::ANY]
}

fn default_any_type() -> RecordType {
    RecordType::A
}

fn default_sentinel_a() -> Ipv4Addr {
    Ipv4Addr::new(127, 0, 0, 2)
}

fn default_sentinel_aaaa() -> Ipv6Addr {
    Ipv4Addr::new(127, 0, 0, 2).to_ipv6_mapped()
}

fn default_sentinel_txt() -> Option<String> {
    Some("Listed".to_string())
}
