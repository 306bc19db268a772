mod helpers;

use ferrous_dnsbl_domain::{
    DnsHeader, DomainError, NormalizedName, Question, RData, RecordType, ResourceRecord,
    ResponseCode,
};
use ferrous_dnsbl_infrastructure::dns::codec::{
    decode_header, decode_query, encode_response, PacketError, MAX_UDP_RESPONSE,
};
use helpers::QueryBuilder;
use hickory_proto::op::Message;
use std::net::Ipv4Addr;

// ── decode ─────────────────────────────────────────────────────────────────

#[test]
fn test_decode_simple_query() {
    let buf = QueryBuilder::new("Example.Net", 1).id(0xABCD).build();

    let decoded = decode_query(&buf).unwrap();

    assert_eq!(decoded.header.id, 0xABCD);
    assert_eq!(decoded.header.qdcount, 1);
    assert!(decoded.header.recursion_desired());
    let question = decoded.question.unwrap();
    assert_eq!(&*question.name, "Example.Net");
    assert_eq!(question.qtype, RecordType::A);
    assert_eq!(question.qclass, 1);
    assert_eq!(&*question.wire_name, &buf[12..buf.len() - 4]);
}

#[test]
fn test_decode_rejects_short_buffer() {
    assert_eq!(decode_header(&[0; 11]), Err(PacketError::TooShort(11)));
    assert_eq!(decode_query(&[]), Err(PacketError::TooShort(0)));
}

#[test]
fn test_decode_header_only_query() {
    let buf = QueryBuilder::empty().build();

    let decoded = decode_query(&buf).unwrap();

    assert_eq!(decoded.header.qdcount, 0);
    assert!(decoded.question.is_none());
}

#[test]
fn test_decode_rejects_compression_pointer() {
    let buf = QueryBuilder::new("example.net", 1)
        .id(0x0102)
        .raw_name(&[0x03, b'w', b'w', b'w', 0xC0, 0x0C])
        .build();

    match decode_query(&buf) {
        Err(PacketError::Malformed { header, .. }) => assert_eq!(header.id, 0x0102),
        other => panic!("expected malformed, got {:?}", other),
    }
}

#[test]
fn test_decode_rejects_extended_label_types() {
    for prefix in [0x40u8, 0x80u8] {
        let buf = QueryBuilder::new("example.net", 1)
            .raw_name(&[prefix | 0x01, b'a', 0x00])
            .build();
        assert!(matches!(
            decode_query(&buf),
            Err(PacketError::Malformed { .. })
        ));
    }
}

#[test]
fn test_decode_rejects_label_running_past_end() {
    let mut buf = QueryBuilder::empty().qdcount(1).build();
    buf.extend_from_slice(&[0x10, b'a', b'b']);

    assert!(matches!(
        decode_query(&buf),
        Err(PacketError::Malformed { .. })
    ));
}

#[test]
fn test_decode_rejects_missing_terminator() {
    let mut buf = QueryBuilder::empty().qdcount(1).build();
    buf.extend_from_slice(&[0x03, b'n', b'e', b't']);

    assert!(matches!(
        decode_query(&buf),
        Err(PacketError::Malformed { .. })
    ));
}

#[test]
fn test_decode_escapes_literal_dot_in_label() {
    let buf = QueryBuilder::new("example.net", 1)
        .raw_name(&[0x03, b'a', b'.', b'b', 0x00])
        .build();

    let question = decode_query(&buf).unwrap().question.unwrap();

    assert_eq!(&*question.name, "a\\046b");
    assert_eq!(&*question.wire_name, &[0x03, b'a', b'.', b'b', 0x00][..]);
}

#[test]
fn test_decode_escapes_non_utf8_octets() {
    let buf = QueryBuilder::new("example.net", 1)
        .raw_name(b"\x03a\xE9b\x07example\x03net\x00")
        .build();

    let question = decode_query(&buf).unwrap().question.unwrap();

    assert_eq!(&*question.name, "a\\233b.example.net");
    let name = NormalizedName::parse(&question.name).unwrap();
    assert_eq!(name.as_str(), "a\\233b.example.net");
}

#[test]
fn test_decode_keeps_unknown_qtype() {
    let buf = QueryBuilder::new("example.net", 65280).build();

    let question = decode_query(&buf).unwrap().question.unwrap();

    assert_eq!(question.qtype, RecordType::Unknown(65280));
}

#[test]
fn test_decode_ignores_trailing_sections() {
    let buf = QueryBuilder::new("example.net", 28).with_edns().build();

    let decoded = decode_query(&buf).unwrap();

    assert_eq!(decoded.header.arcount, 1);
    assert_eq!(decoded.question.unwrap().qtype, RecordType::AAAA);
}

#[test]
fn test_packet_error_converts_to_domain_error() {
    let err: DomainError = PacketError::TooShort(3).into();
    assert_eq!(err, DomainError::TruncatedHeader(3));

    let buf = QueryBuilder::new("example.net", 1).raw_name(&[0xC0, 0x0C]).build();
    let err: DomainError = decode_query(&buf).unwrap_err().into();
    assert!(err.is_malformed());
}

// ── encode ─────────────────────────────────────────────────────────────────

fn request() -> DnsHeader {
    DnsHeader {
        id: 0x4242,
        flags: 0x0100,
        qdcount: 1,
        ancount: 0,
        nscount: 0,
        arcount: 0,
    }
}

#[test]
fn test_encode_listed_response_round_trips() {
    let question = Question::new("bad.example.net", RecordType::A).unwrap();
    let answer = ResourceRecord::new("bad.example.net", 900, RData::A(Ipv4Addr::new(127, 0, 0, 2)));
    let header = DnsHeader::response_to(&request(), ResponseCode::NoError);

    let wire = encode_response(&header, Some(&question), &[answer], MAX_UDP_RESPONSE).unwrap();
    let message = Message::from_vec(&wire).unwrap();

    assert_eq!(message.answers.len(), 1);
    assert_eq!(message.answers[0].name.to_utf8(), "bad.example.net.");
    assert_eq!(message.answers[0].ttl, 900);
    assert_eq!(&wire[0..2], &[0x42, 0x42]);
}

#[test]
fn test_encode_sets_counts_from_sections() {
    let question = Question::new("example.net", RecordType::A).unwrap();
    let mut header = DnsHeader::response_to(&request(), ResponseCode::NXDomain);
    header.ancount = 7;
    header.arcount = 3;

    let wire = encode_response(&header, Some(&question), &[], MAX_UDP_RESPONSE).unwrap();
    let decoded = decode_header(&wire).unwrap();

    assert_eq!(decoded.qdcount, 1);
    assert_eq!(decoded.ancount, 0);
    assert_eq!(decoded.arcount, 0);
    assert_eq!(decoded.response_code(), ResponseCode::NXDomain);
    assert!(decoded.is_response());
    assert!(decoded.authoritative());
    assert!(!decoded.recursion_available());
}

#[test]
fn test_encode_without_question() {
    let header = DnsHeader::response_to(&request(), ResponseCode::FormErr);

    let wire = encode_response(&header, None, &[], MAX_UDP_RESPONSE).unwrap();

    assert_eq!(wire.len(), 12);
    assert_eq!(decode_header(&wire).unwrap().qdcount, 0);
}

#[test]
fn test_encode_is_deterministic() {
    let question = Question::new("example.net", RecordType::AAAA).unwrap();
    let answer = ResourceRecord::new(
        "example.net",
        60,
        RData::AAAA(Ipv4Addr::new(127, 0, 0, 2).to_ipv6_mapped()),
    );
    let header = DnsHeader::response_to(&request(), ResponseCode::NoError);

    let first = encode_response(&header, Some(&question), &[answer.clone()], 512).unwrap();
    let second = encode_response(&header, Some(&question), &[answer], 512).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_encode_drops_answers_over_limit() {
    let question = Question::new("example.net", RecordType::A).unwrap();
    let answer = ResourceRecord::new("example.net", 60, RData::A(Ipv4Addr::LOCALHOST));
    let header = DnsHeader::response_to(&request(), ResponseCode::NoError);

    let limit = 12 + question.wire_len() + 10;
    let wire = encode_response(&header, Some(&question), &[answer], limit).unwrap();
    let decoded = decode_header(&wire).unwrap();

    assert!(decoded.truncated());
    assert_eq!(decoded.ancount, 0);
    assert_eq!(wire.len(), 12 + question.wire_len());
}
