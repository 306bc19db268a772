use ferrous_dnsbl_domain::dns_message::{HEADER_LEN, MAX_LABEL_LEN, MAX_NAME_WIRE_LEN};
use ferrous_dnsbl_domain::{DnsHeader, DomainError, Question, RecordType};
use std::fmt::Write;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    /// Not even a header; there is no transaction ID to answer.
    #[error("packet too short for a DNS header: {0} bytes")]
    TooShort(usize),

    /// The header parsed but the rest did not. The header is kept so a
    /// FORMERR reply can still carry the right ID.
    #[error("malformed DNS packet: {reason}")]
    Malformed { header: DnsHeader, reason: String },
}

impl From<PacketError> for DomainError {
    fn from(err: PacketError) -> Self {
        match err {
            PacketError::TooShort(len) => DomainError::TruncatedHeader(len),
            PacketError::Malformed { reason, .. } => DomainError::MalformedPacket(reason),
        }
    }
}

/// Header plus the first question, if the header announces one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedQuery {
    pub header: DnsHeader,
    pub question: Option<Question>,
}

#[inline]
fn read_u16(buf: &[u8], pos: usize) -> u16 {
    u16::from_be_bytes([buf[pos], buf[pos + 1]])
}

pub fn decode_header(buf: &[u8]) -> Result<DnsHeader, PacketError> {
    if buf.len() < HEADER_LEN {
        return Err(PacketError::TooShort(buf.len()));
    }

    Ok(DnsHeader {
        id: read_u16(buf, 0),
        flags: read_u16(buf, 2),
        qdcount: read_u16(buf, 4),
        ancount: read_u16(buf, 6),
        nscount: read_u16(buf, 8),
        arcount: read_u16(buf, 10),
    })
}

/// Decodes the header and the first question.
///
/// Everything after the first question (further questions, answer,
/// authority and additional sections, EDNS OPT included) is ignored.
pub fn decode_query(buf: &[u8]) -> Result<DecodedQuery, PacketError> {
    let header = decode_header(buf)?;
    if header.qdcount == 0 {
        return Ok(DecodedQuery {
            header,
            question: None,
        });
    }

    let question = decode_question(buf, HEADER_LEN)
        .map_err(|reason| PacketError::Malformed { header, reason })?;

    Ok(DecodedQuery {
        header,
        question: Some(question),
    })
}

fn decode_question(buf: &[u8], start: usize) -> Result<Question, String> {
    let mut pos = start;
    let mut name = String::new();

    loop {
        let Some(&len_octet) = buf.get(pos) else {
            return Err("question name runs past end of packet".to_string());
        };
        let label_len = len_octet as usize;

        if label_len == 0 {
            pos += 1;
            break;
        }
        match len_octet & 0xC0 {
            0x00 => {}
            0xC0 => return Err("compression pointer in question name".to_string()),
            _ => return Err(format!("extended label type 0x{:02x}", len_octet)),
        }
        if label_len > MAX_LABEL_LEN {
            return Err(format!("label length {} exceeds {}", label_len, MAX_LABEL_LEN));
        }

        pos += 1;
        if pos + label_len > buf.len() {
            return Err("label runs past end of packet".to_string());
        }
        // +1 accounts for the terminating zero octet still to come
        if pos + label_len - start + 1 > MAX_NAME_WIRE_LEN {
            return Err(format!("name exceeds {} octets", MAX_NAME_WIRE_LEN));
        }

        if !name.is_empty() {
            name.push('.');
        }
        push_label_text(&mut name, &buf[pos..pos + label_len]);
        pos += label_len;
    }

    let name_end = pos;
    if pos + 4 > buf.len() {
        return Err("question truncated before QTYPE/QCLASS".to_string());
    }
    let qtype = read_u16(buf, pos);
    let qclass = read_u16(buf, pos + 2);

    Ok(Question {
        name: name.into(),
        wire_name: buf[start..name_end].into(),
        qtype: RecordType::from_u16(qtype),
        qclass,
    })
}

/// Appends one label in presentation form. Octets that are not valid
/// UTF-8, plus literal dots and backslashes, become `\DDD` escapes.
fn push_label_text(name: &mut String, label: &[u8]) {
    for chunk in label.utf8_chunks() {
        for c in chunk.valid().chars() {
            match c {
                '.' | '\\' => push_escaped(name, c as u8),
                _ => name.push(c),
            }
        }
        for &octet in chunk.invalid() {
            push_escaped(name, octet);
        }
    }
}

fn push_escaped(name: &mut String, octet: u8) {
    // Writing to a String cannot fail.
    let _ = write!(name, "\\{:03}", octet);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_bytes(labels: &[&[u8]]) -> Vec<u8> {
        let mut buf = vec![0xAB, 0xCD, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0];
        for label in labels {
            buf.push(label.len() as u8);
            buf.extend_from_slice(label);
        }
        buf.push(0);
        buf.extend_from_slice(&[0, 1, 0, 1]);
        buf
    }

    #[test]
    fn test_name_of_exactly_255_octets_is_accepted() {
        // 3 x (1 + 63) + (1 + 61) + 1 = 255
        let long = [b'a'; 63];
        let last = [b'b'; 61];
        let buf = query_bytes(&[&long, &long, &long, &last]);

        let decoded = decode_query(&buf).unwrap();
        assert_eq!(decoded.question.unwrap().wire_name.len(), 255);
    }

    #[test]
    fn test_name_of_256_octets_is_rejected() {
        let long = [b'a'; 63];
        let last = [b'b'; 62];
        let buf = query_bytes(&[&long, &long, &long, &last]);

        assert!(matches!(
            decode_query(&buf),
            Err(PacketError::Malformed { .. })
        ));
    }

    #[test]
    fn test_root_question_has_empty_name() {
        let buf = query_bytes(&[]);
        let question = decode_query(&buf).unwrap().question.unwrap();

        assert_eq!(&*question.name, "");
        assert_eq!(&*question.wire_name, &[0u8][..]);
    }

    #[test]
    fn test_dot_and_backslash_octets_are_escaped() {
        let buf = query_bytes(&[b"a.b\\c", b"net"]);
        let question = decode_query(&buf).unwrap().question.unwrap();

        assert_eq!(&*question.name, "a\\046b\\092c.net");
    }

    #[test]
    fn test_utf8_labels_pass_through_unescaped() {
        let buf = query_bytes(&["b\u{fc}cher".as_bytes(), b"de"]);
        let question = decode_query(&buf).unwrap().question.unwrap();

        assert_eq!(&*question.name, "b\u{fc}cher.de");
    }
}
