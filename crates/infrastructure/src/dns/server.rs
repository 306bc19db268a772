use crate::dns::codec::{self, PacketError};
use ferrous_dnsbl_application::use_cases::HandleDnsQueryUseCase;
use ferrous_dnsbl_domain::dns_message::OPCODE_QUERY;
use ferrous_dnsbl_domain::{DnsHeader, Question, ResourceRecord, ResponseCode};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error};

/// Turns one raw request into at most one raw response.
///
/// Shared by the UDP and TCP listeners; holds no per-request state.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns `None` when the request must be dropped without a reply:
    /// shorter than a header, or itself a response.
    pub async fn handle_raw(
        &self,
        buf: &[u8],
        client: SocketAddr,
        max_size: usize,
    ) -> Option<Vec<u8>> {
        let decoded = match codec::decode_query(buf) {
            Ok(decoded) => decoded,
            Err(PacketError::TooShort(len)) => {
                debug!(client = %client, len, "Dropping packet shorter than DNS header");
                return None;
            }
            Err(PacketError::Malformed { header, reason }) => {
                if header.is_response() {
                    debug!(client = %client, id = header.id, "Dropping malformed response packet");
                    return None;
                }
                debug!(client = %client, id = header.id, reason = %reason, "Malformed query");
                return self.reply(&header, None, ResponseCode::FormErr, &[], max_size);
            }
        };

        let header = decoded.header;
        if header.is_response() {
            debug!(client = %client, id = header.id, "Dropping inbound response (QR=1)");
            return None;
        }

        if header.opcode() != OPCODE_QUERY {
            debug!(client = %client, opcode = header.opcode(), "Non-QUERY opcode");
            return self.reply(
                &header,
                decoded.question.as_ref(),
                ResponseCode::NotImp,
                &[],
                max_size,
            );
        }

        let question = match decoded.question {
            Some(question) if header.qdcount == 1 => question,
            _ => {
                debug!(client = %client, qdcount = header.qdcount, "Query must carry exactly one question");
                return self.reply(&header, None, ResponseCode::FormErr, &[], max_size);
            }
        };

        let outcome = self.use_case.execute(&question).await;

        debug!(
            client = %client,
            domain = %question.name,
            record_type = %question.qtype,
            decision = ?outcome.decision,
            rcode = %outcome.rcode,
            answers = outcome.answers.len(),
            "DNS query answered"
        );

        self.reply(
            &header,
            Some(&question),
            outcome.rcode,
            &outcome.answers,
            max_size,
        )
    }

    fn reply(
        &self,
        request: &DnsHeader,
        question: Option<&Question>,
        rcode: ResponseCode,
        answers: &[ResourceRecord],
        max_size: usize,
    ) -> Option<Vec<u8>> {
        let header = DnsHeader::response_to(request, rcode);
        match codec::encode_response(&header, question, answers, max_size) {
            Ok(wire) => Some(wire),
            Err(e) => {
                error!(id = request.id, error = %e, "Failed to encode response");
                let fallback = DnsHeader::response_to(request, ResponseCode::ServFail);
                codec::encode_response(&fallback, question, &[], max_size).ok()
            }
        }
    }
}
