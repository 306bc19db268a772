use ferrous_dnsbl_domain::dns_message::{encode_name, HEADER_LEN};
use ferrous_dnsbl_domain::{DnsHeader, DomainError, Question, RData, ResourceRecord};

/// Pointer to the question name, which always starts right after the header.
const QUESTION_NAME_POINTER: [u8; 2] = [0xC0, 0x0C];

/// TYPE + CLASS + TTL + RDLENGTH
const RR_FIXED_LEN: usize = 10;

const MAX_CHARACTER_STRING: usize = 255;

/// Owner name as it will be written: a pointer when it repeats the question
/// name, the full label sequence otherwise.
enum OwnerName {
    Pointer,
    Labels(Vec<u8>),
}

impl OwnerName {
    fn for_record(record: &ResourceRecord, question: Option<&Question>) -> Result<Self, DomainError> {
        match question {
            Some(q) if *q.name == *record.name => Ok(OwnerName::Pointer),
            _ => Ok(OwnerName::Labels(encode_name(&record.name)?)),
        }
    }

    fn len(&self) -> usize {
        match self {
            OwnerName::Pointer => QUESTION_NAME_POINTER.len(),
            OwnerName::Labels(wire) => wire.len(),
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        match self {
            OwnerName::Pointer => out.extend_from_slice(&QUESTION_NAME_POINTER),
            OwnerName::Labels(wire) => out.extend_from_slice(wire),
        }
    }
}

/// Encoded size of a response carrying `question` and `answers`.
pub fn response_len(
    question: Option<&Question>,
    answers: &[ResourceRecord],
) -> Result<usize, DomainError> {
    let mut len = HEADER_LEN + question.map_or(0, Question::wire_len);
    for record in answers {
        let owner = OwnerName::for_record(record, question)?;
        len += owner.len() + RR_FIXED_LEN + record.rdata.wire_len();
    }
    Ok(len)
}

/// Encodes a response.
///
/// `header` supplies ID and flags; the section counts are derived from
/// `question` and `answers`. The question is echoed from its original wire
/// octets. When the message would exceed `max_size` the answers are left
/// out and TC is set.
pub fn encode_response(
    header: &DnsHeader,
    question: Option<&Question>,
    answers: &[ResourceRecord],
    max_size: usize,
) -> Result<Vec<u8>, DomainError> {
    let mut header = *header;
    let mut answers = answers;

    let mut total = response_len(question, answers)?;
    if total > max_size {
        header.set_truncated();
        answers = &[];
        total = response_len(question, answers)?;
    }

    header.qdcount = u16::from(question.is_some());
    header.ancount = answers.len() as u16;
    header.nscount = 0;
    header.arcount = 0;

    let mut out = Vec::with_capacity(total);
    write_header(&mut out, &header);

    if let Some(q) = question {
        out.extend_from_slice(&q.wire_name);
        out.extend_from_slice(&q.qtype.to_u16().to_be_bytes());
        out.extend_from_slice(&q.qclass.to_be_bytes());
    }

    for record in answers {
        OwnerName::for_record(record, question)?.write(&mut out);
        write_record_body(&mut out, record);
    }

    Ok(out)
}

fn write_header(out: &mut Vec<u8>, header: &DnsHeader) {
    out.extend_from_slice(&header.id.to_be_bytes());
    out.extend_from_slice(&header.flags.to_be_bytes());
    out.extend_from_slice(&header.qdcount.to_be_bytes());
    out.extend_from_slice(&header.ancount.to_be_bytes());
    out.extend_from_slice(&header.nscount.to_be_bytes());
    out.extend_from_slice(&header.arcount.to_be_bytes());
}

fn write_record_body(out: &mut Vec<u8>, record: &ResourceRecord) {
    out.extend_from_slice(&record.record_type().to_u16().to_be_bytes());
    out.extend_from_slice(&record.class.to_be_bytes());
    out.extend_from_slice(&record.ttl.to_be_bytes());
    out.extend_from_slice(&(record.rdata.wire_len() as u16).to_be_bytes());

    match &record.rdata {
        RData::A(addr) => out.extend_from_slice(&addr.octets()),
        RData::AAAA(addr) => out.extend_from_slice(&addr.octets()),
        RData::TXT(text) => {
            if text.is_empty() {
                out.push(0);
            }
            for chunk in text.as_bytes().chunks(MAX_CHARACTER_STRING) {
                out.push(chunk.len() as u8);
                out.extend_from_slice(chunk);
            }
        }
    }
}
