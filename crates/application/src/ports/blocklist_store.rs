use async_trait::async_trait;
use ferrous_dnsbl_domain::{DomainError, NormalizedName};

/// Read-only view of the blocklist.
///
/// Entries are added and removed by external tooling; the server only ever
/// asks whether a normalized name is present.
#[async_trait]
pub trait BlocklistStore: Send + Sync {
    async fn contains(&self, name: &NormalizedName) -> Result<bool, DomainError>;

    /// Short backend label for logs.
    fn backend_name(&self) -> &'static str;
}
