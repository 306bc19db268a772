//! DNS message model (RFC 1035 §4.1)
//!
//! ```text
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      ID                       |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |          QDCOUNT / ANCOUNT / NSCOUNT / ARCOUNT |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```

use crate::dns_record::RecordType;
use crate::errors::DomainError;
use std::fmt;
use std::sync::Arc;

pub const HEADER_LEN: usize = 12;
pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_WIRE_LEN: usize = 255;

pub const CLASS_IN: u16 = 1;
pub const CLASS_ANY: u16 = 255;

pub const OPCODE_QUERY: u8 = 0;

pub const FLAG_QR: u16 = 0x8000;
pub const FLAG_AA: u16 = 0x0400;
pub const FLAG_TC: u16 = 0x0200;
pub const FLAG_RD: u16 = 0x0100;
pub const FLAG_RA: u16 = 0x0080;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Unknown(u8),
}

impl ResponseCode {
    pub fn to_u8(&self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NXDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Unknown(code) => *code & 0x0F,
        }
    }

    pub fn from_u8(code: u8) -> Self {
        match code & 0x0F {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NXDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Unknown(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsHeader {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl DnsHeader {
    pub fn is_response(&self) -> bool {
        self.flags & FLAG_QR != 0
    }

    pub fn opcode(&self) -> u8 {
        ((self.flags >> 11) & 0x0F) as u8
    }

    pub fn authoritative(&self) -> bool {
        self.flags & FLAG_AA != 0
    }

    pub fn truncated(&self) -> bool {
        self.flags & FLAG_TC != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & FLAG_RD != 0
    }

    pub fn recursion_available(&self) -> bool {
        self.flags & FLAG_RA != 0
    }

    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from_u8((self.flags & 0x000F) as u8)
    }

    /// Reply header for `request`: ID, Opcode and RD mirrored, QR and AA set,
    /// RA clear. Section counts are left at zero for the encoder to fill in.
    pub fn response_to(request: &DnsHeader, rcode: ResponseCode) -> DnsHeader {
        let opcode_bits = request.flags & 0x7800;
        let rd = request.flags & FLAG_RD;
        DnsHeader {
            id: request.id,
            flags: FLAG_QR | opcode_bits | FLAG_AA | rd | rcode.to_u8() as u16,
            qdcount: 0,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    pub fn set_truncated(&mut self) {
        self.flags |= FLAG_TC;
    }
}

/// A single entry of the question section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Dotted presentation form, original case, no trailing dot. Octets
    /// that are not valid UTF-8, dots and backslashes appear as `\DDD`.
    pub name: Arc<str>,
    /// The name exactly as it appeared on the wire, terminator included.
    pub wire_name: Arc<[u8]>,
    pub qtype: RecordType,
    pub qclass: u16,
}

impl Question {
    /// Builds an IN-class question from a dotted name.
    pub fn new(name: &str, qtype: RecordType) -> Result<Self, DomainError> {
        let wire_name = encode_name(name)?;
        let name = name.strip_suffix('.').unwrap_or(name);
        Ok(Self {
            name: name.into(),
            wire_name: wire_name.into(),
            qtype,
            qclass: CLASS_IN,
        })
    }

    /// Encoded length of the question entry (name + QTYPE + QCLASS).
    pub fn wire_len(&self) -> usize {
        self.wire_name.len() + 4
    }

    pub fn is_internet_class(&self) -> bool {
        self.qclass == CLASS_IN || self.qclass == CLASS_ANY
    }
}

/// Encodes a dotted name into uncompressed label format.
///
/// Labels may carry `\DDD` (decimal octet) or `\X` escapes.
pub fn encode_name(name: &str) -> Result<Vec<u8>, DomainError> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    let mut wire = Vec::with_capacity(trimmed.len() + 2);

    if !trimmed.is_empty() {
        for label in trimmed.split('.') {
            let octets = label_octets(label)?;
            if octets.is_empty() {
                return Err(DomainError::InvalidName(format!(
                    "empty label in '{}'",
                    name
                )));
            }
            if octets.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidName(format!(
                    "label longer than {} octets in '{}'",
                    MAX_LABEL_LEN, name
                )));
            }
            wire.push(octets.len() as u8);
            wire.extend_from_slice(&octets);
        }
    }
    wire.push(0);

    if wire.len() > MAX_NAME_WIRE_LEN {
        return Err(DomainError::InvalidName(format!(
            "name exceeds {} octets: '{}'",
            MAX_NAME_WIRE_LEN, name
        )));
    }
    Ok(wire)
}

/// Wire octets of one presentation-form label, with `\DDD` and `\X`
/// escapes decoded.
pub fn label_octets(label: &str) -> Result<Vec<u8>, DomainError> {
    let bytes = label.as_bytes();
    let mut octets = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            octets.push(bytes[i]);
            i += 1;
            continue;
        }
        match &bytes[i + 1..] {
            [a, b, c, ..] if a.is_ascii_digit() && b.is_ascii_digit() && c.is_ascii_digit() => {
                let value =
                    u16::from(a - b'0') * 100 + u16::from(b - b'0') * 10 + u16::from(c - b'0');
                let octet = u8::try_from(value).map_err(|_| {
                    DomainError::InvalidName(format!("escape \\{} out of range in '{}'", value, label))
                })?;
                octets.push(octet);
                i += 4;
            }
            [escaped, ..] => {
                octets.push(*escaped);
                i += 2;
            }
            [] => {
                return Err(DomainError::InvalidName(format!(
                    "dangling escape in '{}'",
                    label
                )))
            }
        }
    }

    Ok(octets)
}
