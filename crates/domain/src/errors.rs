use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("DNS message too short for a header: {0} bytes")]
    TruncatedHeader(usize),

    #[error("Malformed DNS packet: {0}")]
    MalformedPacket(String),

    #[error("Invalid domain name: {0}")]
    InvalidName(String),

    #[error("Unsupported query: {0}")]
    UnsupportedQuery(String),

    #[error("Blocklist store failure: {0}")]
    StoreFailure(String),

    #[error("Blocklist lookup timed out after {0} ms")]
    StoreTimeout(u64),
}

impl DomainError {
    /// Errors that still allow a transaction-matched FORMERR reply.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            DomainError::MalformedPacket(_) | DomainError::InvalidName(_)
        )
    }
}
