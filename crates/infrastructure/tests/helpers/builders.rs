#![allow(dead_code)]
use ferrous_dnsbl_application::ports::BlocklistStore;
use ferrous_dnsbl_application::services::BlocklistMatcher;
use ferrous_dnsbl_application::use_cases::HandleDnsQueryUseCase;
use ferrous_dnsbl_domain::{DnsblZone, ResponseConfig};
use ferrous_dnsbl_infrastructure::dns::DnsServerHandler;
use ferrous_dnsbl_infrastructure::repositories::MemoryBlocklistStore;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

pub const CLIENT: &str = "127.0.0.1:40000";

pub fn client() -> SocketAddr {
    CLIENT.parse().unwrap()
}

/// Raw query packet builder.
pub struct QueryBuilder {
    id: u16,
    flags: u16,
    qdcount: Option<u16>,
    questions: Vec<(Vec<u8>, u16, u16)>,
    trailer: Vec<u8>,
    arcount: u16,
}

impl QueryBuilder {
    pub fn new(name: &str, qtype: u16) -> Self {
        Self {
            id: 0x1234,
            flags: 0x0100,
            qdcount: None,
            questions: vec![(encode(name), qtype, 1)],
            trailer: Vec::new(),
            arcount: 0,
        }
    }

    pub fn empty() -> Self {
        Self {
            id: 0x1234,
            flags: 0x0100,
            qdcount: None,
            questions: Vec::new(),
            trailer: Vec::new(),
            arcount: 0,
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn opcode(mut self, opcode: u8) -> Self {
        self.flags = (self.flags & !0x7800) | ((opcode as u16 & 0x0F) << 11);
        self
    }

    pub fn class(mut self, qclass: u16) -> Self {
        if let Some(q) = self.questions.last_mut() {
            q.2 = qclass;
        }
        self
    }

    pub fn question(mut self, name: &str, qtype: u16) -> Self {
        self.questions.push((encode(name), qtype, 1));
        self
    }

    /// Raw name octets for the (single) question, bypassing label encoding.
    pub fn raw_name(mut self, wire: &[u8]) -> Self {
        if let Some(q) = self.questions.last_mut() {
            q.0 = wire.to_vec();
        }
        self
    }

    pub fn qdcount(mut self, qdcount: u16) -> Self {
        self.qdcount = Some(qdcount);
        self
    }

    pub fn with_edns(mut self) -> Self {
        self.trailer
            .extend_from_slice(&[0x00, 0x00, 0x29, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        self.arcount += 1;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let qdcount = self.qdcount.unwrap_or(self.questions.len() as u16);
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        buf.extend_from_slice(&qdcount.to_be_bytes());
        buf.extend_from_slice(&[0, 0, 0, 0]);
        buf.extend_from_slice(&self.arcount.to_be_bytes());
        for (name, qtype, qclass) in &self.questions {
            buf.extend_from_slice(name);
            buf.extend_from_slice(&qtype.to_be_bytes());
            buf.extend_from_slice(&qclass.to_be_bytes());
        }
        buf.extend_from_slice(&self.trailer);
        buf
    }
}

fn encode(name: &str) -> Vec<u8> {
    let mut wire = Vec::new();
    for label in name.trim_end_matches('.').split('.') {
        if label.is_empty() {
            continue;
        }
        wire.push(label.len() as u8);
        wire.extend_from_slice(label.as_bytes());
    }
    wire.push(0);
    wire
}

/// Handler over an in-memory store with default response settings.
pub fn handler_with(entries: &[&str]) -> DnsServerHandler {
    handler_for(
        Arc::new(MemoryBlocklistStore::from_names(entries.iter().copied())),
        ResponseConfig::default(),
        None,
    )
}

pub fn handler_for(
    store: Arc<dyn BlocklistStore>,
    response: ResponseConfig,
    zone: Option<&str>,
) -> DnsServerHandler {
    let matcher = Arc::new(BlocklistMatcher::new(store, true));
    let mut use_case = HandleDnsQueryUseCase::new(matcher, response, Duration::from_millis(200));
    if let Some(zone) = zone {
        use_case = use_case.with_zone(DnsblZone::new(zone).unwrap());
    }
    DnsServerHandler::new(Arc::new(use_case))
}

pub fn response_id(wire: &[u8]) -> u16 {
    u16::from_be_bytes([wire[0], wire[1]])
}

pub fn response_flags(wire: &[u8]) -> u16 {
    u16::from_be_bytes([wire[2], wire[3]])
}

pub fn rcode(wire: &[u8]) -> u8 {
    wire[3] & 0x0F
}

pub fn qdcount(wire: &[u8]) -> u16 {
    u16::from_be_bytes([wire[4], wire[5]])
}

pub fn ancount(wire: &[u8]) -> u16 {
    u16::from_be_bytes([wire[6], wire[7]])
}
