use crate::services::BlocklistMatcher;
use ferrous_dnsbl_domain::{
    DnsblZone, DomainError, ListingDecision, NormalizedName, Question, ResourceRecord,
    ResponseCode, ResponseConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Result of answering one well-formed question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub rcode: ResponseCode,
    pub answers: Vec<ResourceRecord>,
    /// `None` when the blocklist was never consulted.
    pub decision: Option<ListingDecision>,
}

impl QueryOutcome {
    fn empty(rcode: ResponseCode, decision: Option<ListingDecision>) -> Self {
        Self {
            rcode,
            answers: Vec::new(),
            decision,
        }
    }
}

pub struct HandleDnsQueryUseCase {
    matcher: Arc<BlocklistMatcher>,
    response: ResponseConfig,
    zone: Option<DnsblZone>,
    lookup_timeout: Duration,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        matcher: Arc<BlocklistMatcher>,
        response: ResponseConfig,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            matcher,
            response,
            zone: None,
            lookup_timeout,
        }
    }

    /// Restricts answers to names under `zone`; anything else is refused.
    pub fn with_zone(mut self, zone: DnsblZone) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn zone(&self) -> Option<&DnsblZone> {
        self.zone.as_ref()
    }

    pub async fn execute(&self, question: &Question) -> QueryOutcome {
        if let Err(e) = self.check_supported(question) {
            debug!(domain = %question.name, reason = %e, "Answering without consulting blocklist");
            return QueryOutcome::empty(ResponseCode::NoError, None);
        }

        let name = match NormalizedName::parse(&question.name) {
            Ok(name) => name,
            Err(e) => {
                debug!(domain = %question.name, error = %e, "Query name failed normalization");
                return QueryOutcome::empty(ResponseCode::FormErr, Some(ListingDecision::Malformed));
            }
        };

        if let Some(zone) = &self.zone {
            if !zone.contains(&name) {
                debug!(domain = %name, zone = %zone.apex(), "Query outside configured zone");
                return QueryOutcome::empty(ResponseCode::Refused, None);
            }
            if let Some(address) = zone.address_of(&name) {
                debug!(domain = %name, address = %address, "DNSBL address lookup");
            }
        }

        let listed = match self.lookup(&name).await {
            Ok(listed) => listed,
            Err(e) => {
                warn!(domain = %name, error = %e, "Blocklist lookup failed");
                return QueryOutcome::empty(ResponseCode::ServFail, None);
            }
        };

        let decision = ListingDecision::from_listed(listed);
        if !listed {
            return QueryOutcome::empty(self.response.not_listed.response_code(), Some(decision));
        }

        let answer_type = self.response.answer_type_for(question.qtype);
        match self.response.sentinel_for(answer_type) {
            Some(rdata) => QueryOutcome {
                rcode: ResponseCode::NoError,
                answers: vec![ResourceRecord::new(
                    question.name.clone(),
                    self.response.ttl,
                    rdata,
                )],
                decision: Some(decision),
            },
            None => {
                // Validated configs always carry a sentinel for answerable types.
                warn!(record_type = %answer_type, "No sentinel configured for listed answer");
                QueryOutcome::empty(ResponseCode::NoError, Some(decision))
            }
        }
    }

    fn check_supported(&self, question: &Question) -> Result<(), DomainError> {
        if !question.is_internet_class() {
            return Err(DomainError::UnsupportedQuery(format!(
                "class {}",
                question.qclass
            )));
        }
        if !self.response.is_answerable(question.qtype) {
            return Err(DomainError::UnsupportedQuery(format!(
                "type {}",
                question.qtype
            )));
        }
        Ok(())
    }

    async fn lookup(&self, name: &NormalizedName) -> Result<bool, DomainError> {
        match tokio::time::timeout(self.lookup_timeout, self.matcher.is_listed(name)).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::StoreTimeout(
                self.lookup_timeout.as_millis() as u64,
            )),
        }
    }
}
